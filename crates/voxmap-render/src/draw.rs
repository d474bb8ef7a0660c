//! Draw commands and the sinks that consume them.
//!
//! Renderers never talk to a graphics API directly. They emit [`DrawCommand`]s into a
//! [`DrawSink`]; the host decides whether that is a GPU batch, the software
//! [`Canvas`](crate::Canvas), or a [`DrawList`] recorded for inspection.

use image::{Rgba, RgbaImage};
use voxmap_sprites::SpriteHandle;
use voxmap_view::ScreenRect;

/// Solid fill for voxels whose type has no resolvable sprite.
pub const PLACEHOLDER_COLOR: Rgba<u8> = Rgba([255, 0, 255, 255]);

/// Translucent overlay marking the hovered tile.
pub const HIGHLIGHT_COLOR: Rgba<u8> = Rgba([0, 255, 0, 128]);

/// A single draw operation in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    /// Draw a sprite region stretched into `dest`.
    Sprite {
        /// Sprite to draw.
        sprite: SpriteHandle,
        /// Destination rectangle.
        dest: ScreenRect,
    },
    /// Fill `dest` with an opaque fallback colour.
    Placeholder {
        /// Destination rectangle.
        dest: ScreenRect,
        /// Fill colour.
        color: Rgba<u8>,
    },
    /// Alpha-blend `color` over `dest`.
    Highlight {
        /// Destination rectangle.
        dest: ScreenRect,
        /// Overlay colour, alpha included.
        color: Rgba<u8>,
    },
    /// A full image was presented covering `dest` (recorded by [`DrawList`]).
    Image {
        /// Area covered by the image.
        dest: ScreenRect,
    },
}

impl DrawCommand {
    /// Destination rectangle of the command.
    pub fn dest(&self) -> ScreenRect {
        match *self {
            Self::Sprite { dest, .. }
            | Self::Placeholder { dest, .. }
            | Self::Highlight { dest, .. }
            | Self::Image { dest } => dest,
        }
    }
}

/// Consumer of draw commands.
pub trait DrawSink {
    /// Executes or records one command.
    fn draw(&mut self, command: DrawCommand);

    /// Presents a whole image with its top-left corner at `(x, y)`.
    fn present_image(&mut self, image: &RgbaImage, x: i32, y: i32);
}

/// Recorded sequence of draw commands, in submission order.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty list with room for `capacity` commands.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    /// Recorded commands.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Clears the list for reuse next frame, keeping allocated capacity.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of placeholder fills.
    pub fn placeholder_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Placeholder { .. }))
            .count()
    }

    /// Number of sprite draws.
    pub fn sprite_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { .. }))
            .count()
    }
}

impl DrawSink for DrawList {
    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    fn present_image(&mut self, image: &RgbaImage, x: i32, y: i32) {
        self.commands.push(DrawCommand::Image {
            dest: ScreenRect::new(x, y, image.width() as i32, image.height() as i32),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_list_records_in_order() {
        let mut list = DrawList::new();
        let a = ScreenRect::new(0, 0, 16, 16);
        let b = ScreenRect::new(16, 0, 16, 16);
        list.draw(DrawCommand::Placeholder {
            dest: a,
            color: PLACEHOLDER_COLOR,
        });
        list.draw(DrawCommand::Highlight {
            dest: b,
            color: HIGHLIGHT_COLOR,
        });
        list.present_image(&RgbaImage::new(4, 3), 1, 2);

        assert_eq!(list.len(), 3);
        assert_eq!(list.commands()[0].dest(), a);
        assert_eq!(list.commands()[1].dest(), b);
        assert_eq!(list.commands()[2].dest(), ScreenRect::new(1, 2, 4, 3));
        assert_eq!(list.placeholder_count(), 1);
        assert_eq!(list.sprite_count(), 0);

        list.clear();
        assert!(list.is_empty());
    }
}
