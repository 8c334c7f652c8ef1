//! Renderers: turn a [`RenderContext`] into visible output.
//!
//! The view calls [`Renderer::render`] after every transition that changed
//! the selection, then either [`show_detail`](Renderer::show_detail) (a
//! standard is active) or [`hide_detail`](Renderer::hide_detail) (the
//! detail panel was open and no standard is active any more).
//!
//! | Renderer | Output |
//! |----------|--------|
//! | [`TextRenderer`] | Lens bar, three mastery columns, detail panel |
//! | [`JsonRenderer`] | One JSON context object per line |

use anyhow::Result;
use competency_lens_core::context::RenderContext;
use competency_lens_core::models::{Standard, MASTERY_LEVELS};
use std::io::Write;

pub trait Renderer {
    /// Draw the lens bar and the standards grid.
    fn render(&mut self, ctx: &RenderContext<'_>) -> Result<()>;

    /// Open (or refresh) the detail panel for `ctx.active_standard`.
    fn show_detail(&mut self, ctx: &RenderContext<'_>) -> Result<()>;

    /// Close the detail panel.
    fn hide_detail(&mut self) -> Result<()>;
}

/// Plain-text renderer for terminals.
pub struct TextRenderer<W: Write> {
    out: W,
    title_field: String,
}

impl<W: Write> TextRenderer<W> {
    /// `title_field` names the column used as a standard's one-line label.
    pub fn new(out: W, title_field: impl Into<String>) -> Self {
        Self {
            out,
            title_field: title_field.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn title(&self, standard: &Standard) -> String {
        match standard.field(&self.title_field) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => format!("Standard #{}", standard.id),
        }
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, ctx: &RenderContext<'_>) -> Result<()> {
        writeln!(self.out, "Lenses")?;
        for lens in ctx.lenses {
            let marker = if lens.href == ctx.active_lens.href {
                "*"
            } else {
                " "
            };
            writeln!(self.out, "  {} {:<32} #/{}/", marker, lens.name, lens.href)?;
        }
        writeln!(self.out)?;

        writeln!(self.out, "{}", ctx.active_lens.name)?;
        if !ctx.active_lens.description.is_empty() {
            writeln!(self.out, "  {}", ctx.active_lens.description)?;
        }
        for (level, group) in MASTERY_LEVELS.iter().zip(ctx.mastery.iter()) {
            writeln!(self.out)?;
            writeln!(self.out, "  Mastery {} ({})", level, group.len())?;
            for standard in group {
                let title = self.title(standard);
                writeln!(self.out, "    [{}] {}", standard.id, title)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn show_detail(&mut self, ctx: &RenderContext<'_>) -> Result<()> {
        let Some(standard) = ctx.active_standard else {
            return Ok(());
        };
        let title = self.title(standard);
        writeln!(self.out)?;
        writeln!(self.out, "Detail [{}] {}", standard.id, title)?;
        for (key, value) in standard.fields() {
            if key == &self.title_field || value.is_empty() {
                continue;
            }
            writeln!(self.out, "  {}: {}", key, value)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn hide_detail(&mut self) -> Result<()> {
        writeln!(self.out, "(detail closed)")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Line-delimited JSON renderer for scripts.
///
/// Each render emits the full context; the detail panel is implied by the
/// presence of `activeStandard`.
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, ctx: &RenderContext<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.out, ctx)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    fn show_detail(&mut self, _ctx: &RenderContext<'_>) -> Result<()> {
        Ok(())
    }

    fn hide_detail(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, ctx: &RenderContext<'_>) -> Result<()> {
        (**self).render(ctx)
    }

    fn show_detail(&mut self, ctx: &RenderContext<'_>) -> Result<()> {
        (**self).show_detail(ctx)
    }

    fn hide_detail(&mut self) -> Result<()> {
        (**self).hide_detail()
    }
}
