//! ScreenBuffer - the off-screen buffer all renderers paint into.
//! Holds packed 0xRRGGBB pixels; flushed to the canvas once per frame.

use crate::Painter;

#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Scale each channel of a packed color by `factor` in [0, 1].
pub fn scale_rgb(color: u32, factor: f64) -> u32 {
    let f = factor.clamp(0.0, 1.0);
    let r = (((color >> 16) & 0xFF) as f64 * f) as u32;
    let g = (((color >> 8) & 0xFF) as f64 * f) as u32;
    let b = ((color & 0xFF) as f64 * f) as u32;
    (r << 16) | (g << 8) | b
}

pub struct ScreenBuffer {
    width: i32,
    height: i32,
    pixels: Vec<u32>,
}

impl ScreenBuffer {
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0);
        Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize)],
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn put_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && x < self.width && y >= 0 && y < self.height {
            self.pixels[(y * self.width + x) as usize] = color;
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        let x0 = Ord::max(x, 0);
        let y0 = Ord::max(y, 0);
        let x1 = Ord::min(x + w, self.width);
        let y1 = Ord::min(y + h, self.height);
        for yy in y0..y1 {
            let row = (yy * self.width) as usize;
            for xx in x0..x1 {
                self.pixels[row + xx as usize] = color;
            }
        }
    }

    /// Straight line between two points (used for the map-view ray fan).
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let steps = Ord::max((x1 - x0).abs(), (y1 - y0).abs());
        if steps == 0 {
            self.put_pixel(x0, y0, color);
            return;
        }
        let dx = (x1 - x0) as f64 / steps as f64;
        let dy = (y1 - y0) as f64 / steps as f64;
        for i in 0..=steps {
            let x = x0 as f64 + dx * i as f64;
            let y = y0 as f64 + dy * i as f64;
            self.put_pixel(x.round() as i32, y.round() as i32, color);
        }
    }

    /// Flush the whole buffer to the presentation surface.
    pub fn paint(&self, painter: &mut dyn Painter) {
        let mut idx = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                painter.put_pixel(x, y, self.pixels[idx]);
                idx += 1;
            }
        }
    }
}

//----------------------
//  Tests

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingPainter {
        calls: usize,
        last: (i32, i32, u32),
    }

    impl Painter for CountingPainter {
        fn put_pixel(&mut self, x: i32, y: i32, color: u32) {
            self.calls += 1;
            self.last = (x, y, color);
        }
    }

    #[test]
    fn fill_rect_clips_to_buffer() {
        let mut buf = ScreenBuffer::new(4, 4);
        buf.fill_rect(-2, -2, 10, 10, rgb(1, 2, 3));
        let mut painter = CountingPainter {
            calls: 0,
            last: (0, 0, 0),
        };
        buf.paint(&mut painter);
        assert_eq!(painter.calls, 16);
        assert_eq!(painter.last, (3, 3, rgb(1, 2, 3)));
    }

    #[test]
    fn put_pixel_ignores_outside_coords() {
        let mut buf = ScreenBuffer::new(2, 2);
        buf.put_pixel(-1, 0, 0xFFFFFF);
        buf.put_pixel(0, 5, 0xFFFFFF);
        // no panic, nothing written
        buf.put_pixel(1, 1, 0xABCDEF);
    }

    #[test]
    fn scale_rgb_darkens_per_channel() {
        assert_eq!(scale_rgb(rgb(200, 100, 50), 0.5), rgb(100, 50, 25));
        assert_eq!(scale_rgb(rgb(10, 20, 30), 0.0), 0);
        assert_eq!(scale_rgb(rgb(10, 20, 30), 2.0), rgb(10, 20, 30));
    }
}
