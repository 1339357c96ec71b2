use std::io::Write;

use color_eyre::Result;

use crate::system::snapshot::Snapshot;
use crate::ui::Renderer;

/// Headless renderer: one JSON object per snapshot, newline separated.
pub struct JsonLinesRenderer<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn render(&mut self, snapshot: Snapshot) -> Result<()> {
        serde_json::to_writer(&mut self.out, &snapshot)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        self.written += 1;
        Ok(())
    }
}
