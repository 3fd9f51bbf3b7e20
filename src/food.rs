use crate::grid;
use crate::snake::Snake;
use crate::{Cell, CellInt};

use rand::Rng;

pub struct Food {
    pub pos: Cell,
}

impl Food {
    /// Places the first food of a life somewhere off the snake.
    pub fn spawn<R: Rng>(rng: &mut R, snake: &Snake) -> Self {
        let mut food = Food { pos: snake.head() };
        food.relocate(rng, snake, snake.head(), 0);
        food
    }

    /// Rejection-samples a fresh cell: draw each axis uniformly over the
    /// playable square and round to the nearest cell, redrawing while the
    /// candidate sits on the snake or on the head's previous cell. Once
    /// the snake is one food away from filling the grid no free cell may
    /// exist, so the position is kept as-is even if it overlaps.
    pub fn relocate<R: Rng>(&mut self, rng: &mut R, snake: &Snake, last_head: Cell, eaten: u32) {
        while eaten + 1 < grid::GRID_AREA && (self.pos == last_head || snake.occupies(self.pos)) {
            self.pos = (draw_axis(rng), draw_axis(rng));
        }
    }
}

fn draw_axis<R: Rng>(rng: &mut R) -> CellInt {
    rng.gen_range(-grid::GRID_RADIUS..=grid::GRID_RADIUS).round() as CellInt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Snake occupying (0,0)..(steps,0) with the head at the right end.
    fn snake_with_body(steps: usize) -> Snake {
        let mut snake = Snake::new();
        for _ in 0..steps {
            let last_head = snake.advance(Some(Direction::Right));
            snake.grow(last_head);
            snake.propagate(last_head);
        }
        snake
    }

    #[test]
    fn test_spawn_avoids_the_snake() {
        let snake = snake_with_body(4);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..200 {
            let food = Food::spawn(&mut rng, &snake);
            assert!(!snake.occupies(food.pos));
            assert!(grid::in_bounds(food.pos));
        }
    }

    #[test]
    fn test_relocate_rejects_occupied_cells_and_last_head() {
        let snake = snake_with_body(6);
        let last_head = (6, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut food = Food { pos: snake.head() };

        for eaten in 1..50 {
            food.pos = snake.head(); // force at least one redraw
            food.relocate(&mut rng, &snake, last_head, eaten);

            assert!(!snake.occupies(food.pos));
            assert_ne!(food.pos, last_head);
            assert!(grid::in_bounds(food.pos));
        }
    }

    #[test]
    fn test_relocate_keeps_free_cell_untouched() {
        let snake = snake_with_body(3);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut food = Food { pos: (-4, -4) };

        food.relocate(&mut rng, &snake, snake.head(), 10);

        assert_eq!(food.pos, (-4, -4));
    }

    #[test]
    fn test_saturated_grid_skips_rejection() {
        let snake = snake_with_body(3);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        // Sitting on the snake, but one food from filling the grid
        let mut food = Food { pos: snake.head() };

        food.relocate(&mut rng, &snake, snake.head(), grid::GRID_AREA - 1);

        assert_eq!(food.pos, snake.head());
    }
}
