use crate::Cell;
use Direction::*;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector in cell space, y pointing up.
    pub fn vector(self) -> Cell {
        match self {
            Up => (0, 1),
            Down => (0, -1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

pub struct Snake {
    head: Cell,
    segments: Vec<Cell>, // head-to-tail order
}

impl Snake {
    pub fn new() -> Self {
        Snake { head: (0, 0), segments: vec![] }
    }

    pub fn head(&self) -> Cell {
        self.head
    }

    pub fn segments(&self) -> &[Cell] {
        &self.segments
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.head == cell || self.segments.contains(&cell)
    }

    /// Moves the head one step and returns its pre-move position.
    ///
    /// A request pointing straight back into the first segment is applied
    /// negated: the snake keeps going along its travel vector instead of
    /// folding onto itself.
    pub fn advance(&mut self, pending: Option<Direction>) -> Cell {
        let last_head = self.head;

        if let Some(dir) = pending {
            let mut v = dir.vector();

            if let Some(&neck) = self.segments.first() {
                if (neck.0 - last_head.0, neck.1 - last_head.1) == v {
                    v = (-v.0, -v.1);
                }
            }

            self.head = (last_head.0 + v.0, last_head.1 + v.1);
        }

        last_head
    }

    /// Appends a segment at the head's pre-move position; the same tick's
    /// propagation slots it into place at the end of the chain.
    pub fn grow(&mut self, last_head: Cell) {
        self.segments.push(last_head);
    }

    /// Shift-register step: every segment takes its predecessor's
    /// pre-step position and the first one takes `last_head`. Returns the
    /// cell the tail left unoccupied, if any.
    pub fn propagate(&mut self, last_head: Cell) -> Option<Cell> {
        let vacated = self.segments.last().copied().or(Some(last_head));

        for i in (0..self.segments.len()).rev() {
            self.segments[i] = if i == 0 { last_head } else { self.segments[i - 1] };
        }

        vacated.filter(|&cell| !self.occupies(cell))
    }

    /// Head overlapping any segment past the first, at post-propagation
    /// positions. The first segment holds the head's previous cell and so
    /// can never be a real overlap.
    pub fn hits_self(&self) -> bool {
        self.segments.len() > 1 && self.segments[1..].contains(&self.head)
    }

    /// Displacement the head made on the last propagated step, when a
    /// body exists to witness it.
    pub fn travel(&self) -> Option<Cell> {
        self.segments
            .first()
            .map(|&neck| (self.head.0 - neck.0, self.head.1 - neck.1))
    }
}
