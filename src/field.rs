//! Pixel-field generation: one full deterministic pass over the N×N grid.

use crate::{
    channel::ChannelOps,
    expr::Bindings,
    model::CompiledFormulaSet,
};

/// One computed cell. Channels are raw post-processed values; they are only
/// guaranteed to lie in `[0, 255]` when the channel's operation clamps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pixel {
    pub i: u32,
    pub j: u32,
    pub r: i64,
    pub g: i64,
    pub b: i64,
}

/// Lazily renders all `side * side` pixels in scan order: `i` outer from 0,
/// `j` inner from 0. Deterministic given `(formulas, ops, t)`.
///
/// Per pixel: `x` is evaluated with bindings `(i, j, x=0, t)` — each
/// pixel's `x` is independent, a formula never sees a neighbour's value —
/// then r/g/b evaluate with the just-computed `x` and run through their
/// channel operation. A malformed formula contributes 0 for its slot and
/// nothing else; the pass always completes.
pub fn render_pixels(
    side: u32,
    formulas: &CompiledFormulaSet,
    ops: ChannelOps,
    t: i64,
) -> impl Iterator<Item = Pixel> + '_ {
    (0..side).flat_map(move |i| (0..side).map(move |j| render_pixel(formulas, ops, i, j, t)))
}

fn render_pixel(formulas: &CompiledFormulaSet, ops: ChannelOps, i: u32, j: u32, t: i64) -> Pixel {
    let (bi, bj) = (i64::from(i), i64::from(j));
    let x = formulas.x.eval(Bindings {
        i: bi,
        j: bj,
        x: 0,
        t,
    });
    let bindings = Bindings {
        i: bi,
        j: bj,
        x,
        t,
    };
    Pixel {
        i,
        j,
        r: ops.r.apply(formulas.r.eval(bindings)),
        g: ops.g.apply(formulas.g.eval(bindings)),
        b: ops.b.apply(formulas.b.eval(bindings)),
    }
}

/// One full pass collected into a [`PixelField`].
pub fn render_field(
    side: u32,
    formulas: &CompiledFormulaSet,
    ops: ChannelOps,
    t: i64,
) -> PixelField {
    let mut channels = vec![[0i64; 3]; side as usize * side as usize];
    for px in render_pixels(side, formulas, ops, t) {
        channels[px.j as usize * side as usize + px.i as usize] = [px.r, px.g, px.b];
    }
    PixelField { side, channels }
}

/// The complete grid produced by one render pass. It has no identity
/// beyond that pass; a new one is produced every time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelField {
    side: u32,
    // Row-major by j; the cell for (i, j) sits at j * side + i.
    channels: Vec<[i64; 3]>,
}

impl PixelField {
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Raw `[r, g, b]` for the cell at column `i`, row `j`.
    pub fn get(&self, i: u32, j: u32) -> [i64; 3] {
        self.channels[j as usize * self.side as usize + i as usize]
    }

    /// Re-emits the pixels in render scan order (`i` outer, `j` inner).
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        (0..self.side).flat_map(move |i| {
            (0..self.side).map(move |j| {
                let [r, g, b] = self.get(i, j);
                Pixel { i, j, r, g, b }
            })
        })
    }

    /// Tightly packed RGBA8 bytes (row `j` major, alpha 255), the layout a
    /// drawing surface expects. The surface write clamps each channel to
    /// `[0, 255]`, as a canvas does; raw values stay available via
    /// [`PixelField::get`].
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.channels.len() * 4);
        for [r, g, b] in &self.channels {
            out.push(clamp_u8(*r));
            out.push(clamp_u8(*g));
            out.push(clamp_u8(*b));
            out.push(255);
        }
        out
    }
}

fn clamp_u8(v: i64) -> u8 {
    v.clamp(0, 255) as u8
}
