//! The active edge list.
//!
//! The list is threaded through the edge array of the current fill call: each
//! edge id indexes a `next` slot holding the id of the following active edge.
//! Splicing and unlinking are O(1) once the position is known, and no memory is
//! allocated while the sweep runs.

use super::edge::{Edge, EdgeId};

pub(crate) struct ActiveEdgeList {
    head: Option<EdgeId>,
    next: Vec<Option<EdgeId>>,
}

impl ActiveEdgeList {
    /// Creates an empty list able to hold every edge of a table with
    /// `edge_count` edges.
    pub fn new(edge_count: usize) -> Self {
        Self {
            head: None,
            next: vec![None; edge_count],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Ids from head to tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: &self.next,
            current: self.head,
        }
    }

    /// Splices `id` in ascending `xi` order, after any edges with an equal `xi`.
    pub fn insert(&mut self, edges: &[Edge], id: EdgeId) {
        let xi = edges[id].xi;
        match self.head {
            Some(head) if edges[head].xi <= xi => {
                let mut prev = head;
                while let Some(following) = self.next[prev] {
                    if xi < edges[following].xi {
                        break;
                    }
                    prev = following;
                }
                self.next[id] = self.next[prev];
                self.next[prev] = Some(id);
            }
            _ => {
                self.next[id] = self.head;
                self.head = Some(id);
            }
        }
    }

    /// Unlinks every edge whose last active row is `y`.
    pub fn remove_expired(&mut self, edges: &[Edge], y: i32) {
        let mut prev: Option<EdgeId> = None;
        let mut current = self.head;

        while let Some(id) = current {
            let following = self.next[id];
            if edges[id].ymax == y {
                match prev {
                    None => self.head = following,
                    Some(p) => self.next[p] = following,
                }
                self.next[id] = None;
            } else {
                prev = Some(id);
            }
            current = following;
        }
    }

    /// Steps every active edge to the next scanline and restores the order.
    pub fn advance(&mut self, edges: &mut [Edge]) {
        let mut current = self.head;
        while let Some(id) = current {
            edges[id].xi += edges[id].dx;
            current = self.next[id];
        }
        self.restore_order(edges);
    }

    /// Stable insertion sort over the linked list.
    ///
    /// Walks the list once; an edge that dropped below its predecessor is
    /// unlinked and re-inserted from the head. Linear when nothing crossed.
    fn restore_order(&mut self, edges: &[Edge]) {
        let Some(mut prev) = self.head else {
            return;
        };

        while let Some(id) = self.next[prev] {
            if edges[id].xi >= edges[prev].xi {
                prev = id;
                continue;
            }
            self.next[prev] = self.next[id];
            self.next[id] = None;
            self.insert(edges, id);
        }
    }

    /// Consecutive pairs `(1st, 2nd), (3rd, 4th), ...` as x-intersections.
    /// A trailing unpaired edge yields nothing.
    pub fn pairs<'a>(&'a self, edges: &'a [Edge]) -> impl Iterator<Item = (f32, f32)> + 'a {
        let mut ids = self.iter();
        std::iter::from_fn(move || {
            let left = ids.next()?;
            let right = ids.next()?;
            Some((edges[left].xi, edges[right].xi))
        })
    }

    /// `xi` is non-decreasing from head to tail.
    pub fn is_sorted(&self, edges: &[Edge]) -> bool {
        let mut ids = self.iter();
        let Some(mut prev) = ids.next() else {
            return true;
        };
        for id in ids {
            if edges[id].xi < edges[prev].xi {
                return false;
            }
            prev = id;
        }
        true
    }
}

pub(crate) struct Iter<'a> {
    next: &'a [Option<EdgeId>],
    current: Option<EdgeId>,
}

impl Iterator for Iter<'_> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<EdgeId> {
        let id = self.current?;
        self.current = self.next[id];
        Some(id)
    }
}
