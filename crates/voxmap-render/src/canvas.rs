//! Software rasterizer for draw commands.
//!
//! [`Canvas`] draws into an [`RgbaImage`] so the host has a real frame buffer to save,
//! inspect, or hand to the pixel-sort effect. Sprites are sampled nearest-neighbour from
//! decoded atlas textures held in a [`TextureSet`].

use image::{Rgba, RgbaImage};
use voxmap_sprites::{SpriteAtlas, SpriteHandle, TextureId};
use voxmap_view::ScreenRect;

use crate::draw::{DrawCommand, DrawSink, PLACEHOLDER_COLOR};

/// Decoded textures indexed by [`TextureId`].
#[derive(Debug, Default)]
pub struct TextureSet {
    images: Vec<Option<RgbaImage>>,
}

impl TextureSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes every texture registered with `atlas`.
    ///
    /// Textures that fail to decode are left empty and logged; sprites on them are drawn
    /// as placeholders.
    pub fn load(atlas: &SpriteAtlas) -> Self {
        let images = atlas
            .textures()
            .iter()
            .map(|path| match image::open(path) {
                Ok(img) => Some(img.to_rgba8()),
                Err(e) => {
                    tracing::warn!("Failed to decode texture {}: {}", path.display(), e);
                    None
                }
            })
            .collect();
        Self { images }
    }

    /// Installs an already decoded texture.
    pub fn insert(&mut self, id: TextureId, image: RgbaImage) {
        let index = id.0 as usize;
        if self.images.len() <= index {
            self.images.resize(index + 1, None);
        }
        self.images[index] = Some(image);
    }

    /// Returns the decoded texture, if available.
    pub fn get(&self, id: TextureId) -> Option<&RgbaImage> {
        self.images.get(id.0 as usize).and_then(Option::as_ref)
    }
}

/// An RGBA frame buffer that implements [`DrawSink`].
#[derive(Debug)]
pub struct Canvas<'a> {
    target: RgbaImage,
    textures: &'a TextureSet,
}

impl<'a> Canvas<'a> {
    /// Creates a transparent canvas of the given size.
    pub fn new(width: u32, height: u32, textures: &'a TextureSet) -> Self {
        Self {
            target: RgbaImage::new(width, height),
            textures,
        }
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.target.width()
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.target.height()
    }

    /// Fills the whole canvas.
    pub fn clear(&mut self, color: Rgba<u8>) {
        for px in self.target.pixels_mut() {
            *px = color;
        }
    }

    /// Current frame contents.
    pub fn image(&self) -> &RgbaImage {
        &self.target
    }

    /// Consumes the canvas, returning the frame.
    pub fn into_image(self) -> RgbaImage {
        self.target
    }

    /// Opaque fill of `dest`, clipped to the canvas.
    pub fn fill_rect(&mut self, dest: ScreenRect, color: Rgba<u8>) {
        for (x, y) in self.clip(dest) {
            self.target.put_pixel(x, y, color);
        }
    }

    /// Alpha-blended fill of `dest`.
    pub fn blend_rect(&mut self, dest: ScreenRect, color: Rgba<u8>) {
        for (x, y) in self.clip(dest) {
            let under = *self.target.get_pixel(x, y);
            self.target.put_pixel(x, y, blend(under, color));
        }
    }

    /// Draws `sprite` stretched into `dest`. Falls back to a placeholder fill when the
    /// sprite's texture is not decoded.
    pub fn blit_sprite(&mut self, sprite: SpriteHandle, dest: ScreenRect) {
        let Some(texture) = self.textures.get(sprite.texture) else {
            self.fill_rect(dest, PLACEHOLDER_COLOR);
            return;
        };
        let src = sprite.source;
        if src.w == 0 || src.h == 0 || dest.w <= 0 || dest.h <= 0 {
            return;
        }

        let mut writes = Vec::new();
        for (x, y) in self.clip(dest) {
            let u = (x as i64 - dest.x as i64) * src.w as i64 / dest.w as i64;
            let v = (y as i64 - dest.y as i64) * src.h as i64 / dest.h as i64;
            let (sx, sy) = (src.x + u as u32, src.y + v as u32);
            if sx < texture.width() && sy < texture.height() {
                writes.push((x, y, *texture.get_pixel(sx, sy)));
            }
        }
        for (x, y, texel) in writes {
            let under = *self.target.get_pixel(x, y);
            self.target.put_pixel(x, y, blend(under, texel));
        }
    }

    /// Copies `image` with its top-left corner at `(x, y)`, clipped to the canvas.
    pub fn copy_image(&mut self, image: &RgbaImage, x: i32, y: i32) {
        let dest = ScreenRect::new(x, y, image.width() as i32, image.height() as i32);
        for (px, py) in self.clip(dest) {
            let sx = (px as i64 - x as i64) as u32;
            let sy = (py as i64 - y as i64) as u32;
            self.target.put_pixel(px, py, *image.get_pixel(sx, sy));
        }
    }

    /// Canvas pixels covered by `rect`.
    fn clip(&self, rect: ScreenRect) -> impl Iterator<Item = (u32, u32)> + use<> {
        let x0 = rect.x.max(0) as i64;
        let y0 = rect.y.max(0) as i64;
        let x1 = (rect.x as i64 + rect.w as i64).min(self.target.width() as i64);
        let y1 = (rect.y as i64 + rect.h as i64).min(self.target.height() as i64);
        (y0..y1.max(y0)).flat_map(move |y| (x0..x1.max(x0)).map(move |x| (x as u32, y as u32)))
    }
}

impl DrawSink for Canvas<'_> {
    fn draw(&mut self, command: DrawCommand) {
        match command {
            DrawCommand::Sprite { sprite, dest } => self.blit_sprite(sprite, dest),
            DrawCommand::Placeholder { dest, color } => self.fill_rect(dest, color),
            DrawCommand::Highlight { dest, color } => self.blend_rect(dest, color),
            DrawCommand::Image { .. } => {}
        }
    }

    fn present_image(&mut self, image: &RgbaImage, x: i32, y: i32) {
        self.copy_image(image, x, y);
    }
}

/// Source-over blend of `top` onto `under`.
fn blend(under: Rgba<u8>, top: Rgba<u8>) -> Rgba<u8> {
    let a = top[3] as u32;
    if a == 255 {
        return top;
    }
    if a == 0 {
        return under;
    }
    let mix = |t: u8, u: u8| ((t as u32 * a + u as u32 * (255 - a)) / 255) as u8;
    let out_a = a + under[3] as u32 * (255 - a) / 255;
    Rgba([
        mix(top[0], under[0]),
        mix(top[1], under[1]),
        mix(top[2], under[2]),
        out_a.min(255) as u8,
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use voxmap_sprites::SpriteRect;

    fn checker_texture() -> RgbaImage {
        // 2x2: red, green / blue, white
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 255, 0, 255]));
        img.put_pixel(0, 1, Rgba([0, 0, 255, 255]));
        img.put_pixel(1, 1, Rgba([255, 255, 255, 255]));
        img
    }

    #[test]
    fn test_fill_rect_clips_to_canvas() {
        let textures = TextureSet::new();
        let mut canvas = Canvas::new(4, 4, &textures);
        canvas.fill_rect(ScreenRect::new(-2, -2, 4, 4), Rgba([1, 2, 3, 255]));
        assert_eq!(*canvas.image().get_pixel(0, 0), Rgba([1, 2, 3, 255]));
        assert_eq!(*canvas.image().get_pixel(1, 1), Rgba([1, 2, 3, 255]));
        assert_eq!(*canvas.image().get_pixel(2, 2), Rgba([0, 0, 0, 0]));
        // Fully outside: no panic, no change.
        canvas.fill_rect(ScreenRect::new(10, 10, 4, 4), Rgba([9, 9, 9, 255]));
    }

    #[test]
    fn test_blit_sprite_scales_nearest() {
        let mut textures = TextureSet::new();
        textures.insert(TextureId(0), checker_texture());
        let mut canvas = Canvas::new(4, 4, &textures);
        let sprite = SpriteHandle {
            texture: TextureId(0),
            source: SpriteRect { x: 0, y: 0, w: 2, h: 2 },
        };
        canvas.draw(DrawCommand::Sprite {
            sprite,
            dest: ScreenRect::new(0, 0, 4, 4),
        });
        let img = canvas.image();
        assert_eq!(*img.get_pixel(1, 1), Rgba([255, 0, 0, 255]));
        assert_eq!(*img.get_pixel(3, 0), Rgba([0, 255, 0, 255]));
        assert_eq!(*img.get_pixel(0, 3), Rgba([0, 0, 255, 255]));
        assert_eq!(*img.get_pixel(2, 2), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_missing_texture_draws_placeholder() {
        let textures = TextureSet::new();
        let mut canvas = Canvas::new(2, 2, &textures);
        canvas.blit_sprite(
            SpriteHandle {
                texture: TextureId(3),
                source: SpriteRect { x: 0, y: 0, w: 1, h: 1 },
            },
            ScreenRect::new(0, 0, 2, 2),
        );
        assert_eq!(*canvas.image().get_pixel(1, 1), PLACEHOLDER_COLOR);
    }

    #[test]
    fn test_highlight_blends() {
        let textures = TextureSet::new();
        let mut canvas = Canvas::new(1, 1, &textures);
        canvas.clear(Rgba([0, 0, 0, 255]));
        canvas.draw(DrawCommand::Highlight {
            dest: ScreenRect::new(0, 0, 1, 1),
            color: Rgba([0, 255, 0, 128]),
        });
        let px = *canvas.image().get_pixel(0, 0);
        assert_eq!(px[0], 0);
        assert_eq!(px[1], 128);
        assert_eq!(px[3], 255);
    }

    #[test]
    fn test_present_image_copies() {
        let textures = TextureSet::new();
        let mut canvas = Canvas::new(3, 3, &textures);
        canvas.present_image(&checker_texture(), 1, 1);
        assert_eq!(*canvas.image().get_pixel(1, 1), Rgba([255, 0, 0, 255]));
        assert_eq!(*canvas.image().get_pixel(2, 2), Rgba([255, 255, 255, 255]));
        assert_eq!(*canvas.image().get_pixel(0, 0), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_load_textures_from_atlas() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.png");
        checker_texture().save(&good).unwrap();
        let bad = dir.path().join("bad.png");
        std::fs::write(&bad, b"garbage").unwrap();

        let mut atlas = SpriteAtlas::new();
        let doc = voxmap_sprites::AtlasDocument::default();
        atlas.insert_document("good", &doc, good);
        atlas.insert_document("bad", &doc, bad);

        let textures = TextureSet::load(&atlas);
        assert_eq!(textures.get(TextureId(0)).map(|t| t.width()), Some(2));
        assert!(textures.get(TextureId(1)).is_none());
    }
}
