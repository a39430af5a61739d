//! Builds the display list for the overlay.

use super::tiles::{SplitTiles, HALF_TILE_H, TILE_H, TILE_W};
use crate::game::gfx::{
    CombineMode, CycleType, DisplayList, GeometryMode, GfxCommand, ImageFormat, Rect, RenderMode,
    Rgba, TextureLut, RENDER_TILE,
};

/// Screen position of the top-left corner of the image.
pub const ORIGIN_X: i32 = 40;
pub const ORIGIN_Y: i32 = 30;

/// 1:1 texel step in 5.10 fixed point.
const TEXEL_STEP: i16 = 1 << 10;

fn load_half(image: &[u16]) -> GfxCommand<'_> {
    GfxCommand::LoadTextureBlock {
        image,
        format: ImageFormat::Ia16,
        width: TILE_W as u16,
        height: HALF_TILE_H as u16,
    }
}

fn draw_rect<'a>(rect: Rect) -> GfxCommand<'a> {
    GfxCommand::TextureRectangle {
        rect,
        tile: RENDER_TILE,
        s: 0,
        t: 0,
        dsdx: TEXEL_STEP,
        dtdy: TEXEL_STEP,
    }
}

/// Emits the white backdrop followed by every half tile. The order matters: the backdrop has to
/// go first, and the tiles are drawn row by row with each top half before its bottom half.
pub fn draw_overlay<'a>(alpha: u8, tiles: &'a SplitTiles, disp: &mut DisplayList<'a>) {
    disp.push(GfxCommand::PipeSync);
    disp.push(GfxCommand::SetCycleType(CycleType::OneCycle));
    disp.push(GfxCommand::SetRenderMode(RenderMode::XluSurf));
    disp.push(GfxCommand::SetTextureLut(TextureLut::None));
    disp.push(GfxCommand::ClearGeometryMode(
        GeometryMode::SHADE
            | GeometryMode::SHADING_SMOOTH
            | GeometryMode::FOG
            | GeometryMode::LIGHTING,
    ));
    disp.push(GfxCommand::Texture {
        scale_s: 0xffff,
        scale_t: 0xffff,
        tile: RENDER_TILE,
        on: true,
    });
    disp.push(GfxCommand::SetCombineMode(CombineMode::ModulateIaPrim));
    disp.push(GfxCommand::SetPrimColor(Rgba::white(alpha)));

    disp.push(GfxCommand::FillRectangle(Rect::full_screen()));

    let (tile_w, tile_h, half_h) = (TILE_W as i32, TILE_H as i32, HALF_TILE_H as i32);

    for ((row, col), top) in tiles.top.iter() {
        let bottom = tiles.bottom.get(row, col);

        let ulx = ORIGIN_X + col as i32 * tile_w;
        let uly = ORIGIN_Y + row as i32 * tile_h;
        let lrx = ulx + tile_w;
        let mid_y = uly + half_h;
        let lry = uly + tile_h;

        disp.push(load_half(top.pixels()));
        disp.push(draw_rect(Rect::from_pixels(ulx, uly, lrx, mid_y)));

        disp.push(load_half(bottom.pixels()));
        disp.push(draw_rect(Rect::from_pixels(ulx, mid_y, lrx, lry)));
    }

    disp.push(GfxCommand::PipeSync);
}
