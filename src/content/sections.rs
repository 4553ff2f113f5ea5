//! Ordered section list with copy-on-write operations.
//!
//! Every operation borrows the list and returns a new one. Sections the
//! operation does not touch are shared with the previous list, so callers
//! can detect changes with `Arc::ptr_eq`.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use super::section::{Section, SectionKind};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SectionsError {
    #[error("section index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Direction for [`Sections::move_section`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Section>", into = "Vec<Section>")]
pub struct Sections(Vec<Arc<Section>>);

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Section> {
        self.0.get(index).map(Arc::as_ref)
    }

    /// Shared handle to the section at `index`
    pub fn get_arc(&self, index: usize) -> Option<&Arc<Section>> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.0.iter().map(Arc::as_ref)
    }

    /// Appends an empty section of `kind`.
    pub fn add(&self, kind: SectionKind) -> Self {
        let mut next = self.0.clone();
        next.push(Arc::new(Section::empty(kind)));
        Self(next)
    }

    pub fn remove(&self, index: usize) -> Result<Self, SectionsError> {
        self.check(index)?;
        let mut next = self.0.clone();
        next.remove(index);
        Ok(Self(next))
    }

    /// Swaps the section at `index` with its neighbour.
    ///
    /// Moving the first section up or the last one down returns an
    /// unchanged copy.
    pub fn move_section(&self, index: usize, direction: Direction) -> Result<Self, SectionsError> {
        self.check(index)?;
        let target = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < self.0.len() => index + 1,
            _ => return Ok(self.clone()),
        };
        let mut next = self.0.clone();
        next.swap(index, target);
        Ok(Self(next))
    }

    /// Replaces the section at `index` wholesale.
    pub fn update(&self, index: usize, section: Section) -> Result<Self, SectionsError> {
        self.check(index)?;
        let mut next = self.0.clone();
        next[index] = Arc::new(section);
        Ok(Self(next))
    }

    fn check(&self, index: usize) -> Result<(), SectionsError> {
        if index < self.0.len() {
            Ok(())
        } else {
            Err(SectionsError::OutOfRange {
                index,
                len: self.0.len(),
            })
        }
    }
}

impl From<Vec<Section>> for Sections {
    fn from(sections: Vec<Section>) -> Self {
        Self(sections.into_iter().map(Arc::new).collect())
    }
}

impl From<Sections> for Vec<Section> {
    fn from(sections: Sections) -> Self {
        sections
            .0
            .into_iter()
            .map(|s| Arc::try_unwrap(s).unwrap_or_else(|shared| (*shared).clone()))
            .collect()
    }
}

impl FromIterator<Section> for Sections {
    fn from_iter<I: IntoIterator<Item = Section>>(iter: I) -> Self {
        Self(iter.into_iter().map(Arc::new).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::section::{HeroSection, TextSection};

    fn titled(kind: SectionKind, title: &str) -> Section {
        match Section::empty(kind) {
            Section::Hero(_) => Section::Hero(HeroSection {
                title: title.to_string(),
                ..Default::default()
            }),
            _ => Section::Content(TextSection {
                title: title.to_string(),
                ..Default::default()
            }),
        }
    }

    fn sample() -> Sections {
        vec![
            titled(SectionKind::Hero, "a"),
            titled(SectionKind::Content, "b"),
            titled(SectionKind::Content, "c"),
            titled(SectionKind::Content, "d"),
        ]
        .into()
    }

    fn titles(sections: &Sections) -> Vec<&str> {
        sections.iter().map(Section::title).collect()
    }

    #[test]
    fn test_add_appends_one_empty_section() {
        let list = sample();
        for kind in SectionKind::ALL {
            let next = list.add(kind);
            assert_eq!(next.len(), list.len() + 1);
            let last = next.get(next.len() - 1).unwrap();
            assert_eq!(last.kind(), kind);
            assert!(last.title().is_empty());
            assert!(last.content().is_empty());
        }
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_add_to_empty_list() {
        let list = Sections::new();
        assert!(list.is_empty());
        let next = list.add(SectionKind::Cta);
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn test_remove_only_the_target() {
        let list = sample();
        let next = list.remove(1).unwrap();
        assert_eq!(titles(&next), ["a", "c", "d"]);
        assert_eq!(titles(&list), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_remove_out_of_range() {
        assert_eq!(
            Sections::new().remove(0),
            Err(SectionsError::OutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_move_up_then_down_restores_order() {
        let list = sample();
        for i in 1..list.len() {
            let moved = list.move_section(i, Direction::Up).unwrap();
            assert_ne!(titles(&moved), titles(&list));
            let back = moved.move_section(i - 1, Direction::Down).unwrap();
            assert_eq!(titles(&back), titles(&list));
        }
    }

    #[test]
    fn test_move_at_boundary_is_noop() {
        let list = sample();
        let up = list.move_section(0, Direction::Up).unwrap();
        assert_eq!(up, list);
        let down = list.move_section(3, Direction::Down).unwrap();
        assert_eq!(down, list);
    }

    #[test]
    fn test_move_swaps_neighbours() {
        let list = sample();
        let next = list.move_section(1, Direction::Down).unwrap();
        assert_eq!(titles(&next), ["a", "c", "b", "d"]);
    }

    #[test]
    fn test_update_shares_untouched_sections() {
        let list = sample();
        let next = list.update(2, titled(SectionKind::Content, "z")).unwrap();
        assert_eq!(titles(&next), ["a", "b", "z", "d"]);
        for i in [0, 1, 3] {
            assert!(Arc::ptr_eq(
                list.get_arc(i).unwrap(),
                next.get_arc(i).unwrap()
            ));
            assert_eq!(list.get(i), next.get(i));
        }
        assert!(!Arc::ptr_eq(list.get_arc(2).unwrap(), next.get_arc(2).unwrap()));
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let list = Sections::new().add(SectionKind::Hero);
        let value = serde_json::to_value(&list).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["type"], "hero");
        let decoded: Sections = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, list);
    }
}
