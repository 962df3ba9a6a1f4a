//! Navigable view over the current block list.

use crate::api::types::Block;

/// One step through the block list.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// The authoritative block list plus the position being inspected.
///
/// Invariant: `current < blocks.len()` whenever the list is non-empty, and
/// `current == 0` when it is empty.
#[derive(Debug, Clone, Default)]
pub struct BlockCursor {
    blocks: Vec<Block>,
    current: usize,
}

impl BlockCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole list, keeping the position when it is still valid
    /// and clamping it to the last block otherwise.
    pub fn set_blocks(&mut self, blocks: Vec<Block>) {
        self.blocks = blocks;
        self.current = match self.blocks.len() {
            0 => 0,
            len => self.current.min(len - 1),
        };
    }

    /// Moves one block back or forward. Moving past either end does nothing.
    /// Returns whether the position changed.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Previous if self.can_go_previous() => {
                self.current -= 1;
                true
            }
            Direction::Next if self.can_go_next() => {
                self.current += 1;
                true
            }
            _ => false,
        }
    }

    /// Jumps to the first block whose payload or hash contains the query
    /// (case-insensitive) or whose decimal index contains it.
    ///
    /// A blank query or a query without matches leaves the position alone.
    /// Returns the matched position.
    pub fn search(&mut self, query: &str) -> Option<usize> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        let needle = query.to_lowercase();
        let found = self.blocks.iter().position(|block| {
            block.data.to_lowercase().contains(&needle)
                || block.hash.to_lowercase().contains(&needle)
                || block.index.to_string().contains(query)
        })?;
        self.current = found;
        Some(found)
    }

    pub fn current_block(&self) -> Option<&Block> {
        self.blocks.get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn can_go_previous(&self) -> bool {
        !self.is_empty() && self.current > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.current + 1 < self.blocks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(index: u64, data: &str, hash: &str) -> Block {
        Block {
            index,
            data: data.to_string(),
            hash: hash.to_string(),
            prev_hash: None,
            timestamp: 1_700_000_000 + index as i64,
            nonce: 1000 + index,
        }
    }

    fn chain(len: u64) -> Vec<Block> {
        (0..len)
            .map(|i| block(i, &format!("Voter_{:04} voted for Candidate A", i), &format!("000{:x}", i * 31)))
            .collect()
    }

    #[test]
    fn set_blocks_keeps_cursor_in_range() {
        let mut cursor = BlockCursor::new();
        for len in [0u64, 1, 2, 5, 13] {
            for start in 0..13usize {
                cursor.set_blocks(chain(13));
                for _ in 0..start {
                    cursor.navigate(Direction::Next);
                }
                cursor.set_blocks(chain(len));
                if len == 0 {
                    assert_eq!(cursor.current_index(), 0);
                    assert!(cursor.current_block().is_none());
                } else {
                    assert!(cursor.current_index() < len as usize);
                    assert!(cursor.current_block().is_some());
                }
            }
        }
    }

    #[test]
    fn shrinking_list_clamps_to_last_block() {
        let mut cursor = BlockCursor::new();
        cursor.set_blocks(chain(10));
        for _ in 0..9 {
            cursor.navigate(Direction::Next);
        }
        assert_eq!(cursor.current_index(), 9);

        cursor.set_blocks(chain(4));
        assert_eq!(cursor.current_index(), 3);
        assert!(!cursor.can_go_next());
    }

    #[test]
    fn growing_list_keeps_position() {
        let mut cursor = BlockCursor::new();
        cursor.set_blocks(chain(3));
        cursor.navigate(Direction::Next);
        cursor.set_blocks(chain(8));
        assert_eq!(cursor.current_index(), 1);
    }

    #[test]
    fn navigation_saturates_at_both_ends() {
        let mut cursor = BlockCursor::new();
        cursor.set_blocks(chain(3));

        assert!(!cursor.navigate(Direction::Previous));
        assert_eq!(cursor.current_index(), 0);

        assert!(cursor.navigate(Direction::Next));
        assert_eq!(cursor.current_index(), 1);
        assert!(cursor.navigate(Direction::Next));
        assert_eq!(cursor.current_index(), 2);

        assert!(!cursor.navigate(Direction::Next));
        assert_eq!(cursor.current_index(), 2);

        assert!(cursor.navigate(Direction::Previous));
        assert_eq!(cursor.current_index(), 1);
    }

    #[test]
    fn navigation_on_empty_list_is_a_no_op() {
        let mut cursor = BlockCursor::new();
        assert!(!cursor.navigate(Direction::Next));
        assert!(!cursor.navigate(Direction::Previous));
        assert!(!cursor.can_go_previous());
        assert!(!cursor.can_go_next());
    }

    #[test]
    fn search_jumps_to_first_match() {
        let mut cursor = BlockCursor::new();
        cursor.set_blocks(vec![
            block(0, "Genesis Block - Election Started", "000aaa"),
            block(1, "Voter_0001 voted for Candidate B", "000bbb"),
            block(2, "Voter_0002 voted for Candidate C", "000ccc"),
            block(3, "Voter_0003 voted for Candidate B", "000ddd"),
        ]);

        assert_eq!(cursor.search("candidate b"), Some(1));
        assert_eq!(cursor.current_index(), 1);

        assert_eq!(cursor.search("000CCC"), Some(2));
        assert_eq!(cursor.current_index(), 2);

        assert_eq!(cursor.search("3"), Some(3));
        assert_eq!(cursor.current_index(), 3);
    }

    #[test]
    fn search_without_match_leaves_cursor() {
        let mut cursor = BlockCursor::new();
        cursor.set_blocks(chain(5));
        cursor.navigate(Direction::Next);
        cursor.navigate(Direction::Next);

        assert_eq!(cursor.search("nobody"), None);
        assert_eq!(cursor.current_index(), 2);

        assert_eq!(cursor.search(""), None);
        assert_eq!(cursor.search("   \t"), None);
        assert_eq!(cursor.current_index(), 2);
    }
}
