//! A Rust model of the host's display list. Commands are appended in order and consumed by the
//! host renderer at the end of the frame; we only ever produce them.

use std::ops::BitOr;

/// Width of the host framebuffer in pixels.
pub const SCREEN_WIDTH: i32 = 320;

/// Height of the host framebuffer in pixels.
pub const SCREEN_HEIGHT: i32 = 240;

/// Converts a whole-pixel screen coordinate to the 10.2 fixed-point format used by rectangle
/// commands.
pub const fn fixed(pixels: i32) -> i32 {
    pixels << 2
}

/// An RGBA colour with 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Rgba {
    /// White with the given alpha.
    pub const fn white(alpha: u8) -> Rgba {
        Rgba {
            red: 255,
            green: 255,
            blue: 255,
            alpha,
        }
    }
}

/// A screen rectangle in 10.2 fixed-point coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub ulx: i32,
    pub uly: i32,
    pub lrx: i32,
    pub lry: i32,
}

impl Rect {
    /// Creates a rectangle from whole-pixel corners.
    pub const fn from_pixels(ulx: i32, uly: i32, lrx: i32, lry: i32) -> Rect {
        Rect {
            ulx: fixed(ulx),
            uly: fixed(uly),
            lrx: fixed(lrx),
            lry: fixed(lry),
        }
    }

    /// Covers the whole framebuffer.
    pub const fn full_screen() -> Rect {
        Rect::from_pixels(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    /// Size in whole pixels.
    pub fn size(self) -> (i32, i32) {
        ((self.lrx - self.ulx) >> 2, (self.lry - self.uly) >> 2)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleType {
    OneCycle,
    TwoCycle,
    Copy,
    Fill,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Translucent surface, used for both cycles.
    XluSurf,
    OpaSurf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureLut {
    None,
    Rgba16,
    Ia16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CombineMode {
    /// Texture intensity/alpha modulated by the primitive colour and alpha.
    ModulateIaPrim,
    PrimitiveOnly,
}

/// Pixel formats understood by texture loads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    /// 8 bits of intensity followed by 8 bits of alpha.
    Ia16,
    Rgba16,
}

/// Geometry mode flags, matching the host's bit layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeometryMode(pub u32);

impl GeometryMode {
    pub const SHADE: GeometryMode = GeometryMode(0x0000_0004);
    pub const FOG: GeometryMode = GeometryMode(0x0001_0000);
    pub const LIGHTING: GeometryMode = GeometryMode(0x0002_0000);
    pub const SHADING_SMOOTH: GeometryMode = GeometryMode(0x0020_0000);

    pub fn contains(self, other: GeometryMode) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for GeometryMode {
    type Output = GeometryMode;

    fn bitor(self, rhs: GeometryMode) -> GeometryMode {
        GeometryMode(self.0 | rhs.0)
    }
}

/// The tile descriptor that rectangle draws sample from.
pub const RENDER_TILE: u8 = 0;

/// A single display list command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GfxCommand<'a> {
    PipeSync,
    SetCycleType(CycleType),
    SetRenderMode(RenderMode),
    SetTextureLut(TextureLut),
    ClearGeometryMode(GeometryMode),

    /// Enables or disables texturing with the given S/T scale.
    Texture {
        scale_s: u16,
        scale_t: u16,
        tile: u8,
        on: bool,
    },

    SetCombineMode(CombineMode),
    SetPrimColor(Rgba),

    /// Fills a rectangle using the current combiner state.
    FillRectangle(Rect),

    /// Loads a whole texture into texture memory. The pixels are borrowed until the host has
    /// consumed the list.
    LoadTextureBlock {
        image: &'a [u16],
        format: ImageFormat,
        width: u16,
        height: u16,
    },

    /// Draws a textured rectangle. `s`/`t` are 10.5 texture origins and `dsdx`/`dtdy` are 5.10
    /// per-pixel steps.
    TextureRectangle {
        rect: Rect,
        tile: u8,
        s: i16,
        t: i16,
        dsdx: i16,
        dtdy: i16,
    },
}

/// An append-only command stream owned by the host.
#[derive(Debug, Default)]
pub struct DisplayList<'a> {
    commands: Vec<GfxCommand<'a>>,
}

impl<'a> DisplayList<'a> {
    pub fn new() -> DisplayList<'a> {
        DisplayList::default()
    }

    pub fn push(&mut self, command: GfxCommand<'a>) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[GfxCommand<'a>] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Hands the commands over to the host renderer, leaving the list empty.
    pub fn take(&mut self) -> Vec<GfxCommand<'a>> {
        std::mem::take(&mut self.commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangles_use_fixed_point() {
        let rect = Rect::from_pixels(40, 30, 104, 62);

        assert_eq!(rect.ulx, 160);
        assert_eq!(rect.uly, 120);
        assert_eq!(rect.size(), (64, 32));
        assert_eq!(Rect::full_screen().size(), (320, 240));
    }

    #[test]
    fn geometry_flags_combine() {
        let mode = GeometryMode::SHADE | GeometryMode::FOG;

        assert!(mode.contains(GeometryMode::SHADE));
        assert!(mode.contains(GeometryMode::FOG));
        assert!(!mode.contains(GeometryMode::LIGHTING));
    }

    #[test]
    fn take_empties_the_list() {
        let mut list = DisplayList::new();
        list.push(GfxCommand::PipeSync);
        list.push(GfxCommand::SetPrimColor(Rgba::white(10)));

        let taken = list.take();

        assert_eq!(taken.len(), 2);
        assert!(list.is_empty());
    }
}
