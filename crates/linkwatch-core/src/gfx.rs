use embedded_graphics::{
    Drawable as _,
    mono_font::{MonoTextStyle, MonoTextStyleBuilder, ascii::FONT_8X13},
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, Point},
    text::{Baseline, Text},
};

use crate::consts;

/// 8 px wide cells, sixteen characters across the panel.
fn text_style() -> MonoTextStyle<'static, consts::ColorType> {
    MonoTextStyleBuilder::new()
        .font(&FONT_8X13)
        .text_color(BinaryColor::On)
        // opaque cells: new text replaces whatever was under it
        .background_color(BinaryColor::Off)
        .build()
}

/// Draws one line with its top-left corner at `(x, y)`.
pub fn draw_text<D>(target: &mut D, x: i32, y: i32, text: &str) -> Result<(), D::Error>
where
    D: DrawTarget<Color = consts::ColorType>,
{
    Text::with_baseline(text, Point::new(x, y), text_style(), Baseline::Top).draw(target)?;
    Ok(())
}

pub fn clear<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = consts::ColorType>,
{
    target.clear(BinaryColor::Off)
}
