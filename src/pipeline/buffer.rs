use crate::core::{Color, Pixel};
use minifb::Window;
use rayon::iter::ParallelIterator;
use rayon::slice::ParallelSliceMut;
use std::io::{self, stdout, Write};

/// Output surface the pipeline renders into. Backends decide what a
/// pixel is and how a finished frame reaches the display.
pub trait Buffer {
    type Pixel: Clone + Send + Sync;

    fn new(width: usize, height: usize) -> Self
    where
        Self: Sized;
    fn clear(&mut self);
    fn create_pixel(color: Color) -> Self::Pixel;
    fn set_pixel(&mut self, pos: (usize, usize), depth: &f32, pixel: Self::Pixel);
    fn present(&self) -> io::Result<()> {
        Ok(()) // Default does nothing, which is also the headless path
    }
    fn present_window(&self, _window: &mut Window) -> io::Result<()> {
        Ok(())
    }
}

/// 32-bit RGB buffer for the minifb window target.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u32>,
    pub depth: Vec<f32>,
}

impl Buffer for FrameBuffer {
    type Pixel = u32;

    fn new(width: usize, height: usize) -> Self {
        let buf_size = width * height;
        FrameBuffer {
            width,
            height,
            data: vec![0; buf_size],
            depth: vec![f32::INFINITY; buf_size],
        }
    }

    fn clear(&mut self) {
        self.data.par_chunks_mut(1024).for_each(|chunk| {
            for point in chunk {
                *point = 0;
            }
        });
        self.depth.par_chunks_mut(1024).for_each(|chunk| {
            for d in chunk {
                *d = f32::INFINITY;
            }
        });
    }

    fn create_pixel(color: Color) -> Self::Pixel {
        color.to_u32()
    }

    fn set_pixel(&mut self, pos: (usize, usize), depth: &f32, pixel: Self::Pixel) {
        if pos.0 < self.width && pos.1 < self.height {
            let index = pos.0 + pos.1 * self.width;
            if *depth < self.depth[index] {
                self.data[index] = pixel;
                self.depth[index] = *depth;
            }
        }
    }

    fn present_window(&self, window: &mut Window) -> io::Result<()> {
        window
            .update_with_buffer(&self.data, self.width, self.height)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
    }
}

/// Character-cell buffer for the terminal target.
pub struct TermBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<Pixel>,
    pub depth: Vec<f32>,
}

impl Buffer for TermBuffer {
    type Pixel = Pixel;

    fn new(width: usize, height: usize) -> Self {
        TermBuffer {
            width,
            height,
            data: vec![Pixel::blank(); width * height],
            depth: vec![f32::INFINITY; width * height],
        }
    }

    fn clear(&mut self) {
        self.data.par_chunks_mut(1024).for_each(|chunk| {
            for point in chunk {
                point.reset();
            }
        });
        self.depth.par_chunks_mut(1024).for_each(|chunk| {
            for depth in chunk {
                *depth = f32::INFINITY;
            }
        });
    }

    fn create_pixel(color: Color) -> Self::Pixel {
        Pixel::full(color)
    }

    fn set_pixel(&mut self, pos: (usize, usize), depth: &f32, pixel: Self::Pixel) {
        if pos.0 < self.width && pos.1 < self.height {
            let index = pos.0 + pos.1 * self.width;
            if *depth < self.depth[index] {
                self.data[index] = pixel;
                self.depth[index] = *depth;
            }
        }
    }

    /// One big write with runs of same-colored cells batched under a
    /// single escape sequence, to keep syscalls and flicker down.
    fn present(&self) -> io::Result<()> {
        let mut stdout = stdout();
        let mut output = String::with_capacity(self.width * self.height * 4);

        output.push_str("\x1B[?25l"); // Hide cursor
        output.push_str("\x1B[H"); // Home

        let mut last_color: Option<u32> = None;
        for y in 0..self.height {
            output.push_str(&format!("\x1B[{};1H", y + 1));

            let mut x = 0;
            while x < self.width {
                let pixel = &self.data[x + y * self.width];
                let key = pixel.color.to_u32();

                if last_color != Some(key) {
                    output.push_str(&pixel.color.to_ansii_escape());
                    last_color = Some(key);
                }

                while x < self.width && self.data[x + y * self.width].color.to_u32() == key {
                    output.push(self.data[x + y * self.width].ch);
                    x += 1;
                }
            }
        }

        stdout.write_all(output.as_bytes())?;
        stdout.flush()
    }
}
