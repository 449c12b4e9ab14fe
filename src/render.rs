use crate::{matrix::Matrix, tensor::Tensor};
use std::fmt::{self, Display, Formatter, Write};

/// Column layout used when rendering a matrix or tensor as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOptions {
    /// Minimum width of every element, right-aligned.
    pub width: usize,
    /// Digits after the decimal point for floating-point elements, not
    /// significant digits: `5.67891` with 4 decimals prints as `5.6789`.
    /// Ignored for integers.
    pub decimals: usize,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            width: 8,
            decimals: 4,
        }
    }
}

fn write_grid<T: Display>(
    out: &mut impl Write,
    vals: &[T],
    cols: usize,
    opts: PrintOptions,
) -> fmt::Result {
    if cols == 0 {
        return Ok(());
    }

    for row in vals.chunks(cols) {
        for (j, v) in row.iter().enumerate() {
            if j > 0 {
                out.write_char(' ')?;
            }
            write!(
                out,
                "{:>width$.prec$}",
                v,
                width = opts.width,
                prec = opts.decimals
            )?;
        }
        out.write_char('\n')?;
    }

    Ok(())
}

impl<T: Display> Matrix<T> {
    pub fn render_with(&self, opts: PrintOptions) -> String {
        let mut out = String::new();
        write_grid(&mut out, self.as_slice(), self.num_cols(), opts)
            .expect("writing to a String cannot fail");
        out
    }
}

impl<T: Display> Tensor<T> {
    pub fn render_with(&self, opts: PrintOptions) -> String {
        let mut out = String::new();
        write_tensor(&mut out, self, opts).expect("writing to a String cannot fail");
        out
    }
}

fn write_tensor<T: Display>(out: &mut impl Write, t: &Tensor<T>, opts: PrintOptions) -> fmt::Result {
    let n = t.num_rows() * t.num_cols();
    for k in 0..t.depth() {
        writeln!(out, "Depth Slice {}:", k)?;
        write_grid(out, &t.as_slice()[k * n..(k + 1) * n], t.num_cols(), opts)?;
        out.write_char('\n')?;
    }

    Ok(())
}

impl<T: Display> Display for Matrix<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_grid(f, self.as_slice(), self.num_cols(), PrintOptions::default())
    }
}

impl<T: Display> Display for Tensor<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_tensor(f, self, PrintOptions::default())
    }
}
