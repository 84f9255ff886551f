use indexmap::IndexSet;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::LevelError;
use super::point::Point;
use super::snake::Snake;

/// Every kind of cell that can be found on the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellType {
    Empty,
    Fruit,
    SnakeHead,
    SnakeBody,
    Wall,
}

impl CellType {
    pub const ALL: [CellType; 5] = [
        CellType::Empty,
        CellType::Fruit,
        CellType::SnakeHead,
        CellType::SnakeBody,
        CellType::Wall,
    ];

    /// Level map symbol table
    pub fn from_symbol(symbol: char) -> Option<CellType> {
        match symbol {
            'S' => Some(CellType::SnakeHead),
            's' => Some(CellType::SnakeBody),
            '#' => Some(CellType::Wall),
            'O' => Some(CellType::Fruit),
            '.' => Some(CellType::Empty),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            CellType::SnakeHead => 'S',
            CellType::SnakeBody => 's',
            CellType::Wall => '#',
            CellType::Fruit => 'O',
            CellType::Empty => '.',
        }
    }

    /// Cells the snake head must never enter
    pub fn is_obstacle(&self) -> bool {
        matches!(self, CellType::Wall | CellType::SnakeBody)
    }
}

/// The square playing field
///
/// Alongside the cell grid the field keeps the set of empty cells, so that a
/// random empty cell can be drawn without scanning the board. Every write
/// goes through [`Field::set`], which keeps the two in sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    size: usize,
    /// Row-major cells, `cells[y * size + x]`
    cells: Vec<CellType>,
    empty_cells: IndexSet<Point>,
}

impl Field {
    /// Create a new field from a level map
    ///
    /// Each string is one row, each character one cell. The map must be
    /// square and use only the symbols `S s # O .`.
    pub fn create_level<S: AsRef<str>>(level_map: &[S]) -> Result<Self, LevelError> {
        let size = level_map.len();
        if size == 0 {
            return Err(LevelError::Empty);
        }

        let rows = level_map
            .iter()
            .enumerate()
            .map(|(row, line)| {
                line.as_ref()
                    .chars()
                    .enumerate()
                    .map(|(column, symbol)| {
                        CellType::from_symbol(symbol).ok_or(LevelError::UnknownSymbol {
                            symbol,
                            row,
                            column,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, cells)| cells.len() != size) {
            return Err(LevelError::NotSquare {
                row,
                width: cells.len(),
                size,
            });
        }

        let cells: Vec<CellType> = rows.into_iter().flatten().collect();
        let mut field = Self {
            size,
            cells,
            empty_cells: IndexSet::new(),
        };
        field.empty_cells = field
            .cells()
            .filter(|&(_, cell)| cell == CellType::Empty)
            .map(|(point, _)| point)
            .collect();

        Ok(field)
    }

    /// Get the size of the field (size == width == height)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check if a point lies on the field
    pub fn contains(&self, point: Point) -> bool {
        let size = self.size as i64;
        (0..size).contains(&(point.x as i64)) && (0..size).contains(&(point.y as i64))
    }

    fn index(&self, point: Point) -> usize {
        assert!(
            self.contains(point),
            "point {point} is outside the {size}x{size} field",
            size = self.size
        );
        point.y as usize * self.size + point.x as usize
    }

    /// Get the type of cell at the given point
    ///
    /// # Panics
    ///
    /// Panics if the point is outside the field.
    pub fn get(&self, point: Point) -> CellType {
        self.cells[self.index(point)]
    }

    /// Like [`Field::get`], but returns `None` outside the field
    pub fn try_get(&self, point: Point) -> Option<CellType> {
        self.contains(point).then(|| self.get(point))
    }

    /// Update the type of cell at the given point
    ///
    /// # Panics
    ///
    /// Panics if the point is outside the field.
    pub fn set(&mut self, point: Point, cell_type: CellType) {
        let idx = self.index(point);
        self.cells[idx] = cell_type;

        if cell_type == CellType::Empty {
            self.empty_cells.insert(point);
        } else {
            self.empty_cells.swap_remove(&point);
        }
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Point, CellType)> + '_ {
        let size = self.size;
        self.cells.iter().enumerate().map(move |(idx, &cell)| {
            let point = Point::new((idx % size) as i32, (idx / size) as i32);
            (point, cell)
        })
    }

    /// Raw row-major cell buffer
    pub fn as_slice(&self) -> &[CellType] {
        &self.cells
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.empty_cells.iter().copied()
    }

    pub fn empty_cell_count(&self) -> usize {
        self.empty_cells.len()
    }

    /// Find the snake's head on the field
    pub fn find_snake_head(&self) -> Result<Point, LevelError> {
        self.cells()
            .find(|&(_, cell)| cell == CellType::SnakeHead)
            .map(|(point, _)| point)
            .ok_or(LevelError::NoInitialPosition)
    }

    /// Get the coordinates of a random empty cell, `None` if the board is full
    pub fn get_random_empty_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Point> {
        if self.empty_cells.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.empty_cells.len());
        self.empty_cells.get_index(idx).copied()
    }

    /// Put the snake on the field and fill the cells with its body
    pub fn place_snake(&mut self, snake: &Snake) {
        self.set(snake.head(), CellType::SnakeHead);
        for segment in snake.body().skip(1) {
            self.set(segment, CellType::SnakeBody);
        }
    }

    /// Update field cells according to the new snake position
    ///
    /// `old_tail` is `None` on a growing step, since the tail stays put. A
    /// `new_head` that is a wall or body cell is left untouched; the caller
    /// detects that collision from the cell value before the update.
    pub fn update_field_repr(&mut self, old_head: Point, old_tail: Option<Point>, new_head: Point) {
        self.set(old_head, CellType::SnakeBody);

        if let Some(old_tail) = old_tail {
            self.set(old_tail, CellType::Empty);
        }

        if !self.get(new_head).is_obstacle() {
            self.set(new_head, CellType::SnakeHead);
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_idx, row) in self.cells.chunks(self.size).enumerate() {
            if row_idx > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::Direction;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    const LEVEL: [&str; 5] = ["#####", "#..O#", "#.S.#", "#.s.#", "#####"];

    fn empty_set_matches_grid(field: &Field) -> bool {
        let from_grid: HashSet<Point> = field
            .cells()
            .filter(|&(_, cell)| cell == CellType::Empty)
            .map(|(point, _)| point)
            .collect();
        let tracked: HashSet<Point> = field.empty_cells().collect();
        from_grid == tracked && tracked.len() == field.empty_cell_count()
    }

    #[test]
    fn test_create_level() {
        let field = Field::create_level(&LEVEL).unwrap();

        assert_eq!(field.size(), 5);
        assert_eq!(field.get(Point::new(0, 0)), CellType::Wall);
        assert_eq!(field.get(Point::new(3, 1)), CellType::Fruit);
        assert_eq!(field.get(Point::new(2, 2)), CellType::SnakeHead);
        assert_eq!(field.get(Point::new(2, 3)), CellType::SnakeBody);
        assert_eq!(field.get(Point::new(1, 1)), CellType::Empty);
        assert_eq!(field.empty_cell_count(), 6);
        assert!(empty_set_matches_grid(&field));
    }

    #[test]
    fn test_unknown_symbol_is_rejected() {
        let err = Field::create_level(&["...", ".X.", "..."]).unwrap_err();
        assert_eq!(
            err,
            LevelError::UnknownSymbol {
                symbol: 'X',
                row: 1,
                column: 1
            }
        );
        assert!(err.to_string().contains("\"X\""));
    }

    #[test]
    fn test_non_square_level_is_rejected() {
        let err = Field::create_level(&["...", "....", "..."]).unwrap_err();
        assert_eq!(
            err,
            LevelError::NotSquare {
                row: 1,
                width: 4,
                size: 3
            }
        );

        let err = Field::create_level(&["....", "....", "...."]).unwrap_err();
        assert!(matches!(err, LevelError::NotSquare { row: 0, .. }));
    }

    #[test]
    fn test_empty_level_is_rejected() {
        let level: [&str; 0] = [];
        assert_eq!(Field::create_level(&level).unwrap_err(), LevelError::Empty);
    }

    #[test]
    fn test_display_round_trip() {
        let field = Field::create_level(&LEVEL).unwrap();
        assert_eq!(field.to_string(), LEVEL.join("\n"));
    }

    #[test]
    fn test_find_snake_head() {
        let field = Field::create_level(&LEVEL).unwrap();
        assert_eq!(field.find_snake_head(), Ok(Point::new(2, 2)));

        let field = Field::create_level(&["...", "...", "..."]).unwrap();
        assert_eq!(field.find_snake_head(), Err(LevelError::NoInitialPosition));
    }

    #[test]
    fn test_set_maintains_empty_cells() {
        let mut field = Field::create_level(&LEVEL).unwrap();
        let point = Point::new(1, 1);

        field.set(point, CellType::Fruit);
        assert!(!field.empty_cells().any(|p| p == point));
        assert!(empty_set_matches_grid(&field));

        field.set(point, CellType::Empty);
        assert!(field.empty_cells().any(|p| p == point));
        assert!(empty_set_matches_grid(&field));

        // Setting EMPTY twice must not duplicate the entry
        field.set(point, CellType::Empty);
        assert_eq!(field.empty_cell_count(), 6);
    }

    #[test]
    fn test_try_get_and_contains() {
        let field = Field::create_level(&LEVEL).unwrap();
        assert!(field.contains(Point::new(4, 4)));
        assert!(!field.contains(Point::new(5, 0)));
        assert!(!field.contains(Point::new(0, -1)));
        assert_eq!(field.try_get(Point::new(-1, 2)), None);
        assert_eq!(field.try_get(Point::new(2, 2)), Some(CellType::SnakeHead));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_get_outside_field_panics() {
        let field = Field::create_level(&LEVEL).unwrap();
        field.get(Point::new(5, 5));
    }

    #[test]
    fn test_random_empty_cell() {
        let field = Field::create_level(&LEVEL).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..50 {
            let point = field.get_random_empty_cell(&mut rng).unwrap();
            assert_eq!(field.get(point), CellType::Empty);
        }
    }

    #[test]
    fn test_random_empty_cell_is_reproducible() {
        let field = Field::create_level(&LEVEL).unwrap();
        let mut rng_a = ChaCha8Rng::seed_from_u64(42);
        let mut rng_b = ChaCha8Rng::seed_from_u64(42);

        let a: Vec<_> = (0..10).map(|_| field.get_random_empty_cell(&mut rng_a)).collect();
        let b: Vec<_> = (0..10).map(|_| field.get_random_empty_cell(&mut rng_b)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_empty_cell_on_full_board() {
        let field = Field::create_level(&["##", "#S"]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(field.get_random_empty_cell(&mut rng), None);
    }

    #[test]
    fn test_place_snake() {
        let mut field =
            Field::create_level(&[".....", ".....", "..S..", ".....", "....."]).unwrap();
        let snake = Snake::new(Point::new(2, 2), Direction::North, 3);

        field.place_snake(&snake);

        assert_eq!(field.get(Point::new(2, 2)), CellType::SnakeHead);
        assert_eq!(field.get(Point::new(2, 3)), CellType::SnakeBody);
        assert_eq!(field.get(Point::new(2, 4)), CellType::SnakeBody);
        assert_eq!(field.empty_cell_count(), 22);
        assert!(empty_set_matches_grid(&field));
    }

    #[test]
    fn test_update_field_repr_on_move() {
        let mut field =
            Field::create_level(&[".....", ".....", "..S..", "..s..", "..s.."]).unwrap();

        field.update_field_repr(Point::new(2, 2), Some(Point::new(2, 4)), Point::new(2, 1));

        assert_eq!(field.get(Point::new(2, 1)), CellType::SnakeHead);
        assert_eq!(field.get(Point::new(2, 2)), CellType::SnakeBody);
        assert_eq!(field.get(Point::new(2, 3)), CellType::SnakeBody);
        assert_eq!(field.get(Point::new(2, 4)), CellType::Empty);
        assert!(empty_set_matches_grid(&field));
    }

    #[test]
    fn test_update_field_repr_on_grow() {
        let mut field =
            Field::create_level(&[".....", "..O..", "..S..", "..s..", "..s.."]).unwrap();

        field.update_field_repr(Point::new(2, 2), None, Point::new(2, 1));

        assert_eq!(field.get(Point::new(2, 1)), CellType::SnakeHead);
        assert_eq!(field.get(Point::new(2, 2)), CellType::SnakeBody);
        assert_eq!(field.get(Point::new(2, 4)), CellType::SnakeBody);
        assert!(empty_set_matches_grid(&field));
    }

    #[test]
    fn test_update_field_repr_never_puts_head_in_wall() {
        let mut field =
            Field::create_level(&["#####", "#.S.#", "#.s.#", "#.s.#", "#####"]).unwrap();

        field.update_field_repr(Point::new(2, 1), Some(Point::new(2, 3)), Point::new(2, 0));

        assert_eq!(field.get(Point::new(2, 0)), CellType::Wall);
        assert!(!field.cells().any(|(_, cell)| cell == CellType::SnakeHead));
    }

    #[test]
    fn test_update_field_repr_never_puts_head_in_body() {
        let mut field = Field::create_level(&["....", ".Ss.", ".ss.", "...."]).unwrap();

        field.update_field_repr(Point::new(1, 1), Some(Point::new(1, 2)), Point::new(2, 1));

        assert_eq!(field.get(Point::new(2, 1)), CellType::SnakeBody);
        assert_eq!(field.get(Point::new(1, 1)), CellType::SnakeBody);
        assert!(!field.cells().any(|(_, cell)| cell == CellType::SnakeHead));
        assert!(empty_set_matches_grid(&field));
    }

    #[test]
    fn test_update_field_repr_into_vacated_tail() {
        // A 2x2 loop: the head moves into the cell the tail just left
        let mut field = Field::create_level(&["....", ".Ss.", ".ss.", "...."]).unwrap();

        field.update_field_repr(Point::new(1, 1), Some(Point::new(1, 2)), Point::new(1, 2));

        assert_eq!(field.get(Point::new(1, 2)), CellType::SnakeHead);
        assert_eq!(field.get(Point::new(1, 1)), CellType::SnakeBody);
        assert!(empty_set_matches_grid(&field));
    }

    fn arb_cell() -> impl Strategy<Value = CellType> {
        prop::sample::select(CellType::ALL.to_vec())
    }

    fn arb_level() -> impl Strategy<Value = Vec<String>> {
        (1usize..8).prop_flat_map(|size| {
            prop::collection::vec(
                prop::collection::vec(arb_cell(), size)
                    .prop_map(|row| row.iter().map(CellType::symbol).collect::<String>()),
                size,
            )
        })
    }

    proptest! {
        #[test]
        fn prop_empty_set_tracks_writes(
            writes in prop::collection::vec((0i32..6, 0i32..6, arb_cell()), 0..100),
        ) {
            let mut field = Field::create_level(&["......"; 6]).unwrap();
            for (x, y, cell) in writes {
                field.set(Point::new(x, y), cell);
                prop_assert!(empty_set_matches_grid(&field));
            }
        }

        #[test]
        fn prop_level_round_trip(level in arb_level()) {
            let field = Field::create_level(&level).unwrap();
            prop_assert_eq!(field.to_string(), level.join("\n"));
            prop_assert!(empty_set_matches_grid(&field));
        }

        #[test]
        fn prop_get_is_idempotent(level in arb_level(), x in 0i32..8, y in 0i32..8) {
            let field = Field::create_level(&level).unwrap();
            let before = field.clone();
            let point = Point::new(x, y);
            prop_assert_eq!(field.try_get(point), field.try_get(point));
            prop_assert_eq!(field, before);
        }
    }
}
