/// A 2D grid stored row-major. Unlike a world map this does not wrap:
/// coordinates outside the grid are a caller bug.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T> Tilemap<T> {
    /// Build a grid by calling `f(x, y)` for every cell in row-major order
    /// (y outer, x inner). Call order is part of the contract: generators
    /// that pull from an RNG rely on it for reproducibility.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self { width, height, data }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "({}, {}) out of bounds", x, y);
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks(self.width.max(1))
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width;
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_is_row_major() {
        let mut order = Vec::new();
        let map = Tilemap::from_fn(3, 2, |x, y| {
            order.push((x, y));
            x + 10 * y
        });

        assert_eq!(order, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
        assert_eq!(*map.get(2, 1), 12);
        assert_eq!(map.rows().nth(1).unwrap(), &[10, 11, 12]);
    }

    #[test]
    fn test_rows_and_iter() {
        let map = Tilemap::from_fn(4, 3, |x, y| if (x, y) == (3, 2) { 7u32 } else { 0 });

        assert_eq!(map.rows().count(), 3);
        assert!(map.rows().all(|r| r.len() == 4));
        assert_eq!(map.len(), 12);

        let hit: Vec<_> = map.iter().filter(|(_, _, v)| **v == 7).map(|(x, y, _)| (x, y)).collect();
        assert_eq!(hit, vec![(3, 2)]);
    }
}
