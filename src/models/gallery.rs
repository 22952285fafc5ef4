//! Image gallery navigation for item listings

use serde::Serialize;
use utoipa::ToSchema;

/// Wraparound cursor over an item's image list.
///
/// Next from the last image lands on the first and previous from the
/// first lands on the last. Galleries with zero or one image have
/// nowhere to go, so navigation stays where it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { len }
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.len
    }

    pub fn next(&self, index: usize) -> usize {
        if self.len <= 1 {
            index
        } else {
            (index + 1) % self.len
        }
    }

    pub fn prev(&self, index: usize) -> usize {
        if self.len <= 1 {
            index
        } else {
            (index + self.len - 1) % self.len
        }
    }
}

/// One gallery position with its neighbors resolved
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GalleryImage {
    pub index: usize,
    pub url: String,
    /// Index shown when stepping backwards
    pub prev: usize,
    /// Index shown when stepping forwards
    pub next: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps_to_first() {
        let carousel = Carousel::new(3);
        assert_eq!(carousel.next(0), 1);
        assert_eq!(carousel.next(1), 2);
        assert_eq!(carousel.next(2), 0);
    }

    #[test]
    fn test_prev_wraps_to_last() {
        let carousel = Carousel::new(3);
        assert_eq!(carousel.prev(0), 2);
        assert_eq!(carousel.prev(2), 1);
    }

    #[test]
    fn test_single_image_is_a_no_op() {
        let carousel = Carousel::new(1);
        assert_eq!(carousel.next(0), 0);
        assert_eq!(carousel.prev(0), 0);
    }

    #[test]
    fn test_empty_gallery_is_a_no_op() {
        let carousel = Carousel::new(0);
        assert_eq!(carousel.next(0), 0);
        assert_eq!(carousel.prev(0), 0);
        assert!(!carousel.contains(0));
    }

    #[test]
    fn test_index_stays_in_bounds_for_any_walk() {
        let carousel = Carousel::new(5);
        let mut index = 0;
        // Arbitrary mixed sequence of steps
        for step in [1, 1, -1, 1, 1, 1, -1, -1, 1, 1, 1, 1, -1, 1] {
            index = if step > 0 {
                carousel.next(index)
            } else {
                carousel.prev(index)
            };
            assert!(index < 5);
        }
    }

    #[test]
    fn test_prev_undoes_next() {
        let carousel = Carousel::new(4);
        for start in 0..4 {
            assert_eq!(carousel.prev(carousel.next(start)), start);
            assert_eq!(carousel.next(carousel.prev(start)), start);
        }
    }
}
