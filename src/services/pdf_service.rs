use std::env;
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

// A4 with 2cm margins, sized to match the original print stylesheet.
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const BODY_PT: f32 = 11.0;
const H1_PT: f32 = 22.0;
const H2_PT: f32 = 16.0;
const H3_PT: f32 = 13.0;
const PT_TO_MM: f32 = 0.352_78;

#[derive(Debug)]
pub enum PdfError {
    Render(String),
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfError::Render(msg) => write!(f, "PDF rendering failed: {}", msg),
        }
    }
}

impl Error for PdfError {}

/// Where transient itinerary PDFs live. Shared by the email flow (writer)
/// and the `/temp/{filename}` route (reader).
pub fn temp_storage_dir() -> PathBuf {
    env::var("TEMP_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir().join("journey-api"))
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum BlockKind {
    Heading(u8),
    Paragraph,
    Bullet,
}

#[derive(Debug, PartialEq)]
struct Block {
    kind: BlockKind,
    text: String,
}

/// Converts a markdown itinerary into a styled PDF document.
pub fn create_pdf_from_itinerary(markdown_text: &str) -> Result<Vec<u8>, PdfError> {
    let blocks = markdown_blocks(markdown_text);

    let (doc, first_page, first_layer) = PdfDocument::new(
        "Travel Itinerary",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );

    let body_font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PdfError::Render(e.to_string()))?;
    let heading_font = doc
        .add_builtin_font(BuiltinFont::TimesBold)
        .map_err(|e| PdfError::Render(e.to_string()))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut cursor_y = PAGE_HEIGHT_MM - MARGIN_MM;

    for block in &blocks {
        let (size, font, indent): (f32, &IndirectFontRef, f32) = match block.kind {
            BlockKind::Heading(1) => (H1_PT, &heading_font, 0.0),
            BlockKind::Heading(2) => (H2_PT, &heading_font, 0.0),
            BlockKind::Heading(_) => (H3_PT, &heading_font, 0.0),
            BlockKind::Paragraph => (BODY_PT, &body_font, 0.0),
            BlockKind::Bullet => (BODY_PT, &body_font, 5.0),
        };
        let line_height = size * PT_TO_MM * 1.5;
        let usable_width = PAGE_WIDTH_MM - 2.0 * MARGIN_MM - indent;
        // Helvetica averages roughly half an em per glyph.
        let max_chars = (usable_width / (size * PT_TO_MM * 0.5)).max(10.0) as usize;

        let mut lines = Vec::new();
        for (index, line) in wrap_text(&block.text, max_chars).into_iter().enumerate() {
            if block.kind == BlockKind::Bullet && index == 0 {
                lines.push(format!("• {}", line));
            } else {
                lines.push(line);
            }
        }

        for line in lines {
            if cursor_y < MARGIN_MM + line_height {
                let (page, layer_index) =
                    doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
                layer = doc.get_page(page).get_layer(layer_index);
                cursor_y = PAGE_HEIGHT_MM - MARGIN_MM;
            }
            layer.use_text(line, size, Mm(MARGIN_MM + indent), Mm(cursor_y), font);
            cursor_y -= line_height;
        }
        // Breathing room between blocks.
        cursor_y -= line_height * 0.5;
    }

    doc.save_to_bytes()
        .map_err(|e| PdfError::Render(e.to_string()))
}

/// Flattens markdown into a sequence of styled text blocks. Inline emphasis
/// collapses to plain text; image alt text is dropped; link text is kept.
fn markdown_blocks(markdown_text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut buffer = String::new();
    let mut kind = BlockKind::Paragraph;
    let mut in_item = false;
    let mut image_depth: u32 = 0;

    fn flush(kind: BlockKind, buffer: &mut String, blocks: &mut Vec<Block>) {
        let text = buffer.split_whitespace().collect::<Vec<_>>().join(" ");
        if !text.is_empty() {
            blocks.push(Block { kind, text });
        }
        buffer.clear();
    }

    for event in Parser::new(markdown_text) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                flush(kind, &mut buffer, &mut blocks);
                kind = BlockKind::Heading(heading_rank(level));
            }
            Event::End(TagEnd::Heading(_)) => {
                flush(kind, &mut buffer, &mut blocks);
                kind = BlockKind::Paragraph;
            }
            Event::Start(Tag::Item) => {
                flush(kind, &mut buffer, &mut blocks);
                kind = BlockKind::Bullet;
                in_item = true;
            }
            Event::End(TagEnd::Item) => {
                flush(kind, &mut buffer, &mut blocks);
                kind = BlockKind::Paragraph;
                in_item = false;
            }
            Event::End(TagEnd::Paragraph) if !in_item => {
                flush(kind, &mut buffer, &mut blocks);
            }
            Event::Start(Tag::Image { .. }) => image_depth += 1,
            Event::End(TagEnd::Image) => image_depth = image_depth.saturating_sub(1),
            Event::Text(text) | Event::Code(text) if image_depth == 0 => {
                buffer.push_str(&text);
            }
            Event::SoftBreak | Event::HardBreak => buffer.push(' '),
            _ => {}
        }
    }
    flush(kind, &mut buffer, &mut blocks);

    blocks
}

fn heading_rank(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        _ => 3,
    }
}

/// Greedy word wrap; words longer than the budget are hard-split.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if word.len() > max_chars {
            let mut rest = word;
            while rest.len() > max_chars {
                let (head, tail) = rest.split_at(max_chars);
                lines.push(head.to_string());
                rest = tail;
            }
            current = rest.to_string();
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
