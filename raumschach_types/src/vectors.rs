/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// A direction of travel, ordered `[dz, dx, dy]` (level, file, rank).
pub type Vector = [i8; 3];

/// Six axis-aligned directions: `±1` on exactly one axis.
pub const ROOK_VECTORS: [Vector; 6] = [
    [1, 0, 0],
    [-1, 0, 0],
    [0, 1, 0],
    [0, -1, 0],
    [0, 0, 1],
    [0, 0, -1],
];

/// Twelve two-axis diagonals: `±1` on exactly two axes.
pub const BISHOP_VECTORS: [Vector; 12] = [
    [1, 1, 0],
    [1, -1, 0],
    [-1, 1, 0],
    [-1, -1, 0],
    [1, 0, 1],
    [1, 0, -1],
    [-1, 0, 1],
    [-1, 0, -1],
    [0, 1, 1],
    [0, 1, -1],
    [0, -1, 1],
    [0, -1, -1],
];

/// Eight space diagonals: `±1` on all three axes.
pub const UNICORN_VECTORS: [Vector; 8] = [
    [1, 1, 1],
    [1, 1, -1],
    [1, -1, 1],
    [1, -1, -1],
    [-1, 1, 1],
    [-1, 1, -1],
    [-1, -1, 1],
    [-1, -1, -1],
];

/// The union of the Rook, Bishop, and Unicorn directions.
///
/// The Queen slides along these; the King steps once along them.
pub const QUEEN_VECTORS: [Vector; 26] = queen_vectors();

/// Every signed permutation of `(2, 1, 0)` across the three axes.
pub const KNIGHT_VECTORS: [Vector; 24] = knight_vectors();

const fn queen_vectors() -> [Vector; 26] {
    let mut vectors = [[0; 3]; 26];
    let mut n = 0;

    let mut i = 0;
    while i < ROOK_VECTORS.len() {
        vectors[n] = ROOK_VECTORS[i];
        n += 1;
        i += 1;
    }

    i = 0;
    while i < BISHOP_VECTORS.len() {
        vectors[n] = BISHOP_VECTORS[i];
        n += 1;
        i += 1;
    }

    i = 0;
    while i < UNICORN_VECTORS.len() {
        vectors[n] = UNICORN_VECTORS[i];
        n += 1;
        i += 1;
    }

    vectors
}

const fn knight_vectors() -> [Vector; 24] {
    // Which axis holds the 2, which holds the 1, and which stays still.
    const SHAPES: [Vector; 6] = [
        [2, 1, 0],
        [1, 2, 0],
        [2, 0, 1],
        [1, 0, 2],
        [0, 2, 1],
        [0, 1, 2],
    ];

    let mut vectors = [[0; 3]; 24];
    let mut n = 0;

    let mut s = 0;
    while s < SHAPES.len() {
        // Two non-zero axes, so four sign combinations per shape.
        let mut signs = 0;
        while signs < 4 {
            let mut vector = SHAPES[s];
            let mut bit = 0;
            let mut axis = 0;
            while axis < 3 {
                if vector[axis] != 0 {
                    if (signs >> bit) & 1 == 1 {
                        vector[axis] = -vector[axis];
                    }
                    bit += 1;
                }
                axis += 1;
            }

            vectors[n] = vector;
            n += 1;
            signs += 1;
        }
        s += 1;
    }

    vectors
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn nonzero_axes(vector: &Vector) -> usize {
        vector.iter().filter(|&&d| d != 0).count()
    }

    fn assert_unique(vectors: &[Vector]) {
        let set: HashSet<_> = vectors.iter().collect();
        assert_eq!(set.len(), vectors.len(), "duplicate vectors in {vectors:?}");
    }

    #[test]
    fn test_rook_vectors() {
        assert_unique(&ROOK_VECTORS);
        for v in ROOK_VECTORS {
            assert_eq!(nonzero_axes(&v), 1);
            assert!(v.iter().all(|d| d.abs() <= 1));
        }
    }

    #[test]
    fn test_bishop_vectors() {
        assert_unique(&BISHOP_VECTORS);
        for v in BISHOP_VECTORS {
            assert_eq!(nonzero_axes(&v), 2);
            assert!(v.iter().all(|d| d.abs() <= 1));
        }
    }

    #[test]
    fn test_unicorn_vectors() {
        assert_unique(&UNICORN_VECTORS);
        for v in UNICORN_VECTORS {
            assert!(v.iter().all(|d| d.abs() == 1));
        }
    }

    #[test]
    fn test_queen_vectors_are_the_union() {
        assert_unique(&QUEEN_VECTORS);
        let union: HashSet<_> = ROOK_VECTORS
            .iter()
            .chain(&BISHOP_VECTORS)
            .chain(&UNICORN_VECTORS)
            .collect();
        let queen: HashSet<_> = QUEEN_VECTORS.iter().collect();
        assert_eq!(queen, union);

        // Every non-zero step of at most one square on each axis.
        assert_eq!(QUEEN_VECTORS.len(), 3 * 3 * 3 - 1);
    }

    #[test]
    fn test_knight_vectors() {
        assert_unique(&KNIGHT_VECTORS);
        for v in KNIGHT_VECTORS {
            let mut magnitudes = v.map(i8::abs);
            magnitudes.sort();
            assert_eq!(magnitudes, [0, 1, 2], "{v:?}");
        }
    }
}
