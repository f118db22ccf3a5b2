//! Ordered lists of cached values of mixed kinds
use super::item::{Item, ItemKind, ItemValue};
use crate::{
    errors::XlsxError,
    stream::utils::{XmlListReader, XmlListWriter, XmlReader, XmlWriter},
};
use quick_xml::{events::BytesStart, Reader, Writer};
use std::{
    fmt::Debug,
    io::{BufRead, Write},
    marker::PhantomData,
};

/// The closed set of item kinds a container element may hold.
pub trait ItemSchema: Debug + Clone + Default + PartialEq {
    /// Container tag, used in error messages
    const CONTAINER: &'static str;
    const KINDS: &'static [ItemKind];

    fn accepts(kind: ItemKind) -> bool {
        Self::KINDS.contains(&kind)
    }
}

const CACHE_KINDS: &[ItemKind] = &[
    ItemKind::Missing,
    ItemKind::Number,
    ItemKind::Boolean,
    ItemKind::Error,
    ItemKind::String,
    ItemKind::DateTime,
];

/// `m n b e s d`, as held by `sharedItems`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheItems;
impl ItemSchema for CacheItems {
    const CONTAINER: &'static str = "sharedItems";
    const KINDS: &'static [ItemKind] = CACHE_KINDS;
}

/// `m n b e s d`, as held by `groupItems`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupedItems;
impl ItemSchema for GroupedItems {
    const CONTAINER: &'static str = "groupItems";
    const KINDS: &'static [ItemKind] = CACHE_KINDS;
}

/// `m n b e s d x`, as held by a cache record `r`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordItems;
impl ItemSchema for RecordItems {
    const CONTAINER: &'static str = "r";
    const KINDS: &'static [ItemKind] = &ItemKind::ALL;
}

/// `m n e s`, as held by the tuple cache `entries`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryItems;
impl ItemSchema for EntryItems {
    const CONTAINER: &'static str = "entries";
    const KINDS: &'static [ItemKind] = &[
        ItemKind::Missing,
        ItemKind::Number,
        ItemKind::Error,
        ItemKind::String,
    ];
}

/// An ordered list of cached values whose kinds interleave freely.
///
/// Items are kept in document order, so writing reproduces the original
/// sequence of tags. The per-kind view (all numbers, all strings, ...) and the
/// `(kind, position within kind)` view are derived from that order.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantList<S> {
    items: Vec<Item>,
    schema: PhantomData<S>,
}

impl<S> Default for VariantList<S> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            schema: PhantomData,
        }
    }
}

impl<S: ItemSchema> VariantList<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list, failing on the first item of a kind `S` does not allow.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Result<Self, XlsxError> {
        let mut list = Self::new();
        for item in items {
            list.push(item)?;
        }
        Ok(list)
    }

    pub fn push(&mut self, item: Item) -> Result<(), XlsxError> {
        let kind = item.kind();
        if !S::accepts(kind) {
            return Err(XlsxError::UnsupportedItem {
                container: S::CONTAINER,
                kind,
            });
        }
        self.items.push(item);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Changing the payload kind through this reference bypasses the kind check
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Item> {
        self.items.get_mut(index)
    }

    /// Swaps the item at `index` for another one of an allowed kind.
    pub fn replace(&mut self, index: usize, item: Item) -> Result<Item, XlsxError> {
        let kind = item.kind();
        if !S::accepts(kind) {
            return Err(XlsxError::UnsupportedItem {
                container: S::CONTAINER,
                kind,
            });
        }
        let len = self.items.len();
        match self.items.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, item)),
            None => Err(XlsxError::ItemOutOfRange { index, len }),
        }
    }

    /// Takes the item at `index` out, shifting the later ones down.
    pub fn remove(&mut self, index: usize) -> Option<Item> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Item] {
        &self.items
    }

    /// Items of one kind, in document order
    pub fn of_kind(&self, kind: ItemKind) -> impl Iterator<Item = &Item> + '_ {
        self.items.iter().filter(move |item| item.kind() == kind)
    }

    pub fn count_of(&self, kind: ItemKind) -> usize {
        self.of_kind(kind).count()
    }

    pub fn numbers(&self) -> impl Iterator<Item = f64> + '_ {
        self.items.iter().filter_map(Item::as_number)
    }

    pub fn strings(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().filter_map(Item::as_str)
    }

    /// For every slot, its kind and its position among the items of that kind.
    pub fn kind_order(&self) -> Vec<(ItemKind, usize)> {
        let mut seen = [0usize; ItemKind::ALL.len()];
        self.items
            .iter()
            .map(|item| {
                let kind = item.kind();
                let slot = &mut seen[kind as usize];
                let position = *slot;
                *slot += 1;
                (kind, position)
            })
            .collect()
    }

    /// Looks an item up through its `(kind, position within kind)` pair.
    pub fn by_kind_index(&self, kind: ItemKind, index: usize) -> Option<&Item> {
        self.of_kind(kind).nth(index)
    }
}

impl<'a, S> IntoIterator for &'a VariantList<S> {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<B, S> XmlListReader<B> for VariantList<S>
where
    B: BufRead,
    S: ItemSchema,
{
    fn read_entry(
        &mut self,
        start: &BytesStart<'_>,
        xml: &mut Reader<B>,
        empty: bool,
    ) -> Result<bool, XlsxError> {
        let kind = match ItemKind::from_tag(start.local_name().as_ref()) {
            Some(kind) if S::accepts(kind) => kind,
            _ => return Ok(false),
        };
        let mut item = Item::new(ItemValue::empty(kind));
        item.read_xml(start, xml, empty)?;
        self.items.push(item);
        Ok(true)
    }
}

impl<W, S> XmlListWriter<W> for VariantList<S>
where
    W: Write,
    S: ItemSchema,
{
    fn write_entries(&self, writer: &mut Writer<W>) -> Result<(), XlsxError> {
        for item in &self.items {
            item.write_xml(writer, item.kind().tag())?;
        }
        Ok(())
    }
}
