//! The overlay image. It is stored as a 4×4 mosaic of 64×64 IA16 tiles, but texture memory can
//! only hold half a tile at a time, so each tile is split into a top and bottom 64×32 half once
//! after the scene is initialised.

use byteorder::{BigEndian, ByteOrder};
use itertools::iproduct;
use once_cell::sync::OnceCell;

pub const TILES_X: usize = 4;
pub const TILES_Y: usize = 4;

pub const TILE_W: usize = 64;
pub const TILE_H: usize = 64;
pub const HALF_TILE_H: usize = TILE_H / 2;

pub const TILE_SIZE: usize = TILE_W * TILE_H;
pub const HALF_TILE_SIZE: usize = TILE_W * HALF_TILE_H;

/// Size of one encoded tile in bytes.
pub const TILE_BYTES: usize = TILE_SIZE * 2;

/// Size of the encoded mosaic in bytes.
pub const MOSAIC_BYTES: usize = TILE_BYTES * TILES_X * TILES_Y;

/// The bundled image. Tiles are stored one after another in row-major order, each as big-endian
/// IA16 pixels.
static CINEMA_ASSET: &[u8; MOSAIC_BYTES] = include_bytes!("../../../assets/cinema.ia16");

/// A 64×64 tile of IA16 pixels in row-major order.
#[derive(Clone, PartialEq, Eq)]
pub struct Tile {
    pixels: Box<[u16; TILE_SIZE]>,
}

impl Tile {
    pub fn new(pixels: [u16; TILE_SIZE]) -> Tile {
        Tile {
            pixels: Box::new(pixels),
        }
    }

    /// Decodes big-endian IA16 pixel data.
    pub fn from_be_bytes(bytes: &[u8; TILE_BYTES]) -> Tile {
        Tile::read_be(bytes)
    }

    // `bytes` must be exactly `TILE_BYTES` long.
    fn read_be(bytes: &[u8]) -> Tile {
        let mut pixels = Box::new([0u16; TILE_SIZE]);
        BigEndian::read_u16_into(bytes, &mut pixels[..]);

        Tile { pixels }
    }

    pub fn pixels(&self) -> &[u16; TILE_SIZE] {
        &self.pixels
    }

    /// Returns one row of pixels.
    pub fn row(&self, row: usize) -> &[u16] {
        &self.pixels[row * TILE_W..(row + 1) * TILE_W]
    }
}

/// Half of a tile: 64×32 IA16 pixels in row-major order.
#[derive(Clone, PartialEq, Eq)]
pub struct HalfTile {
    pixels: Box<[u16; HALF_TILE_SIZE]>,
}

impl HalfTile {
    /// Copies `HALF_TILE_H` rows of `tile` starting at `first_row`.
    fn copy_rows(tile: &Tile, first_row: usize) -> HalfTile {
        let mut pixels = Box::new([0u16; HALF_TILE_SIZE]);

        for row in 0..HALF_TILE_H {
            pixels[row * TILE_W..(row + 1) * TILE_W].copy_from_slice(tile.row(first_row + row));
        }

        HalfTile { pixels }
    }

    pub fn pixels(&self) -> &[u16] {
        &self.pixels[..]
    }
}

/// A 4×4 grid of values, stored row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Mosaic<T> {
    cells: Vec<T>,
}

impl<T> Mosaic<T> {
    /// Builds the grid by calling `f(row, col)` for every position in row-major order.
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> T) -> Mosaic<T> {
        Mosaic {
            cells: iproduct!(0..TILES_Y, 0..TILES_X)
                .map(|(row, col)| f(row, col))
                .collect(),
        }
    }

    pub fn get(&self, row: usize, col: usize) -> &T {
        &self.cells[row * TILES_X + col]
    }

    /// Iterates in row-major order, yielding `(row, col)` with each value.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        iproduct!(0..TILES_Y, 0..TILES_X).zip(self.cells.iter())
    }
}

impl Mosaic<Tile> {
    /// Decodes a whole mosaic of big-endian IA16 tiles.
    pub fn from_be_bytes(bytes: &[u8; MOSAIC_BYTES]) -> Mosaic<Tile> {
        Mosaic {
            cells: bytes.chunks_exact(TILE_BYTES).map(Tile::read_be).collect(),
        }
    }

    /// The image bundled with the mod.
    pub fn bundled() -> Mosaic<Tile> {
        Mosaic::from_be_bytes(CINEMA_ASSET)
    }
}

/// The top and bottom halves of every tile.
pub struct SplitTiles {
    pub top: Mosaic<HalfTile>,
    pub bottom: Mosaic<HalfTile>,
}

/// Splits every tile into its top rows `[0, 32)` and bottom rows `[32, 64)`.
pub fn split(source: &Mosaic<Tile>) -> SplitTiles {
    SplitTiles {
        top: Mosaic::from_fn(|row, col| HalfTile::copy_rows(source.get(row, col), 0)),
        bottom: Mosaic::from_fn(|row, col| {
            HalfTile::copy_rows(source.get(row, col), HALF_TILE_H)
        }),
    }
}

static SPLIT_TILES: OnceCell<SplitTiles> = OnceCell::new();

/// Splits the bundled image. Only the first call does any work.
pub fn init() -> &'static SplitTiles {
    if let Some(tiles) = SPLIT_TILES.get() {
        log::debug!("Cinema tiles were already split.");
        return tiles;
    }

    SPLIT_TILES.get_or_init(|| {
        let tiles = split(&Mosaic::bundled());
        log::info!("Split {} cinema tiles.", TILES_X * TILES_Y);
        tiles
    })
}

/// Returns the split tiles, or `None` if `init` hasn't been called yet.
pub fn get() -> Option<&'static SplitTiles> {
    SPLIT_TILES.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a tile where every pixel encodes its own tile and pixel index.
    fn numbered_tile(tile_index: usize) -> Tile {
        let mut pixels = [0u16; TILE_SIZE];

        for (i, pixel) in pixels.iter_mut().enumerate() {
            *pixel = ((tile_index << 12) | i) as u16;
        }

        Tile::new(pixels)
    }

    fn numbered_mosaic() -> Mosaic<Tile> {
        Mosaic::from_fn(|row, col| numbered_tile(row * TILES_X + col))
    }

    #[test]
    fn halves_match_source_rows() {
        let source = numbered_mosaic();
        let split = split(&source);

        for ((row, col), tile) in source.iter() {
            let top = split.top.get(row, col).pixels();
            let bottom = split.bottom.get(row, col).pixels();

            assert_eq!(top, &tile.pixels()[..HALF_TILE_SIZE]);
            assert_eq!(bottom, &tile.pixels()[HALF_TILE_SIZE..]);

            for half_row in 0..HALF_TILE_H {
                let range = half_row * TILE_W..(half_row + 1) * TILE_W;

                assert_eq!(&top[range.clone()], tile.row(half_row));
                assert_eq!(&bottom[range], tile.row(half_row + HALF_TILE_H));
            }
        }
    }

    #[test]
    fn splitting_twice_gives_the_same_result() {
        let source = numbered_mosaic();
        let first = split(&source);
        let second = split(&source);

        assert!(first.top == second.top);
        assert!(first.bottom == second.bottom);
    }

    #[test]
    fn mosaic_iterates_row_major() {
        let mosaic = Mosaic::from_fn(|row, col| (row, col));
        let order: Vec<_> = mosaic.iter().map(|(pos, value)| (pos, *value)).collect();

        assert_eq!(order.len(), TILES_X * TILES_Y);
        assert_eq!(order[0], ((0, 0), (0, 0)));
        assert_eq!(order[1], ((0, 1), (0, 1)));
        assert_eq!(order[TILES_X], ((1, 0), (1, 0)));
        assert!(order.iter().all(|(pos, value)| pos == value));
    }

    #[test]
    fn decodes_big_endian_pixels() {
        let mut bytes = [0u8; TILE_BYTES];
        bytes[0] = 0x12;
        bytes[1] = 0x34;
        bytes[TILE_BYTES - 2] = 0xff;
        bytes[TILE_BYTES - 1] = 0x01;

        let tile = Tile::from_be_bytes(&bytes);

        assert_eq!(tile.pixels()[0], 0x1234);
        assert_eq!(tile.pixels()[TILE_SIZE - 1], 0xff01);
    }

    #[test]
    fn bundled_image_tiles_are_in_order() {
        let mosaic = Mosaic::bundled();
        let (_, last) = mosaic.iter().last().unwrap();

        let offset = MOSAIC_BYTES - TILE_BYTES;
        let expected = u16::from_be_bytes([CINEMA_ASSET[offset], CINEMA_ASSET[offset + 1]]);

        assert_eq!(last.pixels()[0], expected);
    }

    #[test]
    fn init_is_idempotent() {
        let first = init() as *const SplitTiles;
        let second = init() as *const SplitTiles;

        assert_eq!(first, second);
        assert!(get().is_some());
    }
}
