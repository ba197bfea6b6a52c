//! Shareable winner-card rendering.
//!
//! Draws the fixed 600x800 prediction card: dark gradient background,
//! yellow frame, header lines with an inline logo, the winner's portrait
//! clipped to a ringed circle, the wrapped winner name, a tagline, and a
//! footer URL. Output is a plain [`image::RgbaImage`]; a PNG save helper
//! is included for hosts that want a file.
//!
//! Rendering failures stay inside this crate (see [`Error`]); callers
//! surface the winner regardless of whether the card could be drawn.

use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use font_kit::{family_name::FamilyName, properties::Properties, source::SystemSource};
use image::{Rgba, RgbaImage, imageops};
use imageproc::drawing::draw_text_mut;
use tracing::debug;

mod error;

pub use error::{Error, Result};

/// Card width in pixels.
pub const CARD_WIDTH: u32 = 600;
/// Card height in pixels.
pub const CARD_HEIGHT: u32 = 800;

const BORDER_INSET: i64 = 20;
const BORDER_THICKNESS: i64 = 10;
const HEADER_FONT_PX: f32 = 50.0;
const HEADER_TOP: i64 = 60;
const HEADER_LINE_ADVANCE: i64 = 60;
const LOGO_SIZE: u32 = 50;
const LOGO_GAP: f32 = 10.0;
const PORTRAIT_CENTER: (i64, i64) = (300, 325);
const PORTRAIT_RADIUS: i64 = 150;
const RING_THICKNESS: i64 = 5;
const NAME_FONT_PX: f32 = 60.0;
const NAME_TOP: i64 = 510;
const NAME_LINE_ADVANCE: i64 = 70;
const NAME_MAX_WIDTH: f32 = 500.0;
const TAGLINE_FONT_PX: f32 = 40.0;
const TAGLINE_GAP: i64 = 50;
const FOOTER_FONT_PX: f32 = 20.0;
const FOOTER_TOP: i64 = 740;

const GRADIENT_TOP: Rgba<u8> = Rgba([0x1a, 0x1a, 0x1a, 0xff]);
const GRADIENT_BOTTOM: Rgba<u8> = Rgba([0x00, 0x00, 0x00, 0xff]);
const FRAME_COLOR: Rgba<u8> = Rgba([0xff, 0xea, 0x00, 0xff]);
const HEADER_COLOR: Rgba<u8> = Rgba([0x76, 0xff, 0x03, 0xff]);
const NAME_COLOR: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);
const FOOTER_COLOR: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0x80]);

/// The card's text content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardSpec {
    /// First header line, drawn with the logo inline after it.
    pub headline: String,
    /// Second header line, centered below the first.
    pub subline: String,
    /// The winner's display name; uppercased and word-wrapped.
    pub winner_name: String,
    /// Line drawn below the name.
    pub tagline: String,
    /// Footer URL at the bottom of the card.
    pub footer: String,
}

/// Renders winner cards with a fixed layout.
pub struct CardRenderer {
    font: FontVec,
}

impl CardRenderer {
    /// Create a renderer backed by the best matching system display font.
    pub fn new() -> Result<Self> {
        Ok(Self {
            font: load_system_font()?,
        })
    }

    /// Create a renderer with a caller-supplied font.
    pub fn with_font(font: FontVec) -> Self {
        Self { font }
    }

    /// Draw the card.
    ///
    /// `portrait` is the winning item's image; `logo` is drawn inline
    /// after the headline when present.
    pub fn render(
        &self,
        spec: &CardSpec,
        portrait: &RgbaImage,
        logo: Option<&RgbaImage>,
    ) -> RgbaImage {
        let mut card = RgbaImage::new(CARD_WIDTH, CARD_HEIGHT);

        for y in 0..CARD_HEIGHT {
            let color = gradient_color(y, CARD_HEIGHT);
            for x in 0..CARD_WIDTH {
                card.put_pixel(x, y, color);
            }
        }
        draw_frame(&mut card);

        // Header line 1: headline with the logo inline after it, the
        // combined block centered.
        let scale = PxScale::from(HEADER_FONT_PX);
        let headline_width = text_width(&self.font, scale, &spec.headline);
        let block_width = match logo {
            Some(_) => headline_width + LOGO_GAP + LOGO_SIZE as f32,
            None => headline_width,
        };
        let start_x = (CARD_WIDTH as f32 - block_width) / 2.0;
        draw_text_mut(
            &mut card,
            HEADER_COLOR,
            start_x as i32,
            HEADER_TOP as i32,
            scale,
            &self.font,
            &spec.headline,
        );
        if let Some(logo) = logo {
            let resized = imageops::resize(
                logo,
                LOGO_SIZE,
                LOGO_SIZE,
                imageops::FilterType::Triangle,
            );
            imageops::overlay(
                &mut card,
                &resized,
                (start_x + headline_width + LOGO_GAP) as i64,
                HEADER_TOP,
            );
        }

        // Header line 2, centered.
        self.draw_centered(
            &mut card,
            &spec.subline,
            HEADER_FONT_PX,
            HEADER_TOP + HEADER_LINE_ADVANCE,
            HEADER_COLOR,
        );

        // Winner portrait, clipped to a circle with a ring around it.
        blit_circular(&mut card, portrait, PORTRAIT_CENTER, PORTRAIT_RADIUS);
        draw_ring(
            &mut card,
            PORTRAIT_CENTER,
            PORTRAIT_RADIUS,
            RING_THICKNESS,
            FRAME_COLOR,
        );

        // Winner name, uppercased and wrapped.
        let name = spec.winner_name.to_uppercase();
        let name_scale = PxScale::from(NAME_FONT_PX);
        let lines = wrap_lines(
            |line| text_width(&self.font, name_scale, line),
            &name,
            NAME_MAX_WIDTH,
        );
        let mut line_top = NAME_TOP;
        for line in &lines {
            self.draw_centered(&mut card, line, NAME_FONT_PX, line_top, NAME_COLOR);
            line_top += NAME_LINE_ADVANCE;
        }

        self.draw_centered(
            &mut card,
            &spec.tagline,
            TAGLINE_FONT_PX,
            line_top + TAGLINE_GAP - NAME_LINE_ADVANCE,
            NAME_COLOR,
        );
        self.draw_centered(&mut card, &spec.footer, FOOTER_FONT_PX, FOOTER_TOP, FOOTER_COLOR);

        debug!(
            winner = %spec.winner_name,
            lines = lines.len(),
            "card rendered"
        );
        card
    }

    /// Render and save as PNG.
    pub fn render_to_png(
        &self,
        spec: &CardSpec,
        portrait: &RgbaImage,
        logo: Option<&RgbaImage>,
        path: &Path,
    ) -> Result<()> {
        let card = self.render(spec, portrait, logo);
        card.save(path)?;
        debug!(path = %path.display(), "card saved");
        Ok(())
    }

    fn draw_centered(
        &self,
        card: &mut RgbaImage,
        text: &str,
        font_px: f32,
        top: i64,
        color: Rgba<u8>,
    ) {
        let scale = PxScale::from(font_px);
        let width = text_width(&self.font, scale, text);
        let x = (CARD_WIDTH as f32 - width) / 2.0;
        draw_text_mut(card, color, x as i32, top as i32, scale, &self.font, text);
    }
}

/// Vertical interpolation between the gradient endpoints.
fn gradient_color(y: u32, height: u32) -> Rgba<u8> {
    let t = f64::from(y) / f64::from(height.saturating_sub(1).max(1));
    let channel = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t) as u8;
    Rgba([
        channel(GRADIENT_TOP[0], GRADIENT_BOTTOM[0]),
        channel(GRADIENT_TOP[1], GRADIENT_BOTTOM[1]),
        channel(GRADIENT_TOP[2], GRADIENT_BOTTOM[2]),
        0xff,
    ])
}

/// Frame stroke centered on the inset rectangle, like a canvas stroke.
fn draw_frame(card: &mut RgbaImage) {
    let half = BORDER_THICKNESS / 2;
    let (outer_l, outer_t) = (BORDER_INSET - half, BORDER_INSET - half);
    let outer_r = CARD_WIDTH as i64 - BORDER_INSET + half;
    let outer_b = CARD_HEIGHT as i64 - BORDER_INSET + half;
    let (inner_l, inner_t) = (BORDER_INSET + half, BORDER_INSET + half);
    let inner_r = CARD_WIDTH as i64 - BORDER_INSET - half;
    let inner_b = CARD_HEIGHT as i64 - BORDER_INSET - half;
    for y in outer_t..outer_b {
        for x in outer_l..outer_r {
            let inside = x >= inner_l && x < inner_r && y >= inner_t && y < inner_b;
            if !inside && x >= 0 && y >= 0 && (x as u32) < CARD_WIDTH && (y as u32) < CARD_HEIGHT {
                card.put_pixel(x as u32, y as u32, FRAME_COLOR);
            }
        }
    }
}

/// Copy `src` into `dst` clipped to a circle at `center` with `radius`.
fn blit_circular(dst: &mut RgbaImage, src: &RgbaImage, center: (i64, i64), radius: i64) {
    let side = (radius * 2) as u32;
    let resized = imageops::resize(src, side, side, imageops::FilterType::Triangle);
    for dy in -radius..radius {
        for dx in -radius..radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let x = center.0 + dx;
            let y = center.1 + dy;
            if x < 0 || y < 0 || x as u32 >= dst.width() || y as u32 >= dst.height() {
                continue;
            }
            let pixel = resized.get_pixel((dx + radius) as u32, (dy + radius) as u32);
            dst.put_pixel(x as u32, y as u32, *pixel);
        }
    }
}

/// Annulus of `thickness` straddling `radius`.
fn draw_ring(card: &mut RgbaImage, center: (i64, i64), radius: i64, thickness: i64, color: Rgba<u8>) {
    let half = thickness / 2 + thickness % 2;
    let outer = radius + half;
    let inner = radius - half;
    for dy in -outer..=outer {
        for dx in -outer..=outer {
            let d2 = dx * dx + dy * dy;
            if d2 > outer * outer || d2 < inner * inner {
                continue;
            }
            let x = center.0 + dx;
            let y = center.1 + dy;
            if x < 0 || y < 0 || x as u32 >= card.width() || y as u32 >= card.height() {
                continue;
            }
            card.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Advance-sum width of `text` at `scale`.
fn text_width(font: &FontVec, scale: PxScale, text: &str) -> f32 {
    let scaled = font.as_scaled(scale);
    text.chars()
        .map(|c| scaled.h_advance(scaled.glyph_id(c)))
        .sum()
}

/// Greedy word wrap: words are packed into a line until the next word
/// would push it past `max_width`. A single over-long word still gets a
/// line of its own.
fn wrap_lines<F>(measure: F, text: &str, max_width: f32) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if !line.is_empty() && measure(&candidate) > max_width {
            lines.push(line);
            line = word.to_string();
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Load the best matching system display font.
fn load_system_font() -> Result<FontVec> {
    let source = SystemSource::new();
    let families = [
        FamilyName::Title("Impact".to_string()),
        FamilyName::Title("Arial".to_string()),
        FamilyName::SansSerif,
        FamilyName::Title("DejaVu Sans".to_string()),
    ];
    for family in families {
        let Ok(handle) = source.select_best_match(&[family], &Properties::new()) else {
            continue;
        };
        let Ok(font) = handle.load() else {
            continue;
        };
        if let Some(bytes) = font.copy_font_data() {
            if let Ok(font) = FontVec::try_from_vec(bytes.to_vec()) {
                return Ok(font);
            }
        }
    }
    Err(Error::Font("no usable system font found".to_string()))
}
