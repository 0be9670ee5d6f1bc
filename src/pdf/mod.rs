//! Vector PDF export of the rendered invoice.
//!
//! Lays the lines of [`InvoicePreview::text_lines`] out on portrait pages in
//! Helvetica, wrapping lines wider than the text area at spaces (or inside a
//! word that is wider on its own) and starting a new page whenever one fills
//! up. The raster options
//! of [`ExportOptions`] (`image_quality`, `render_scale`) do not apply to
//! vector output and are ignored.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};
use tracing::debug;

use crate::core::InvoiceError;
use crate::preview::{ExportOptions, ExportedPdf, InvoicePreview, PdfExporter};

const FONT_SIZE: i64 = 10;
const LEADING: i64 = 14;
const MARGIN: i64 = 50;

/// Helvetica advance widths for WinAnsi 0x20..=0x7E, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];
/// Width assumed for bytes outside printable ASCII.
const DEFAULT_GLYPH_WIDTH: u16 = 556;

/// [`PdfExporter`] producing a text-only PDF with lopdf.
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorPdfExporter;

impl VectorPdfExporter {
    pub fn new() -> Self {
        Self
    }
}

impl PdfExporter for VectorPdfExporter {
    fn export(
        &self,
        preview: &InvoicePreview,
        options: &ExportOptions,
    ) -> Result<ExportedPdf, InvoiceError> {
        let lines = preview.text_lines();
        let bytes = render(&lines, options)?;
        Ok(ExportedPdf {
            filename: options.filename.clone(),
            bytes,
        })
    }
}

fn render(lines: &[String], options: &ExportOptions) -> Result<Vec<u8>, InvoiceError> {
    let (width, height) = options.page_format.size_pt();
    let (width, height) = (width as i64, height as i64);
    let per_page = ((height - 2 * MARGIN) / LEADING).max(1) as usize;
    let max_width = (width - 2 * MARGIN) as f32;
    let lines: Vec<String> = lines
        .iter()
        .flat_map(|line| wrap_line(line, max_width))
        .collect();

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => Object::Reference(font_id),
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for chunk in lines.chunks(per_page) {
        let content_id = add_page_content(&mut doc, chunk, height)?;
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Reference(resources_id),
        });
        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(options.filename.as_str()),
        "Producer" => Object::string_literal("quickbill"),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.trailer.set("Info", Object::Reference(info_id));
    doc.compress();

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| InvoiceError::Export(format!("failed to save PDF: {e}")))?;

    debug!(pages = page_count, bytes = output.len(), "rendered invoice PDF");
    Ok(output)
}

fn add_page_content(
    doc: &mut Document,
    lines: &[String],
    height: i64,
) -> Result<ObjectId, InvoiceError> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]),
        Operation::new("TL", vec![LEADING.into()]),
        Operation::new("Td", vec![MARGIN.into(), (height - MARGIN).into()]),
    ];
    for line in lines {
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(line), StringFormat::Literal)],
        ));
        operations.push(Operation::new("T*", vec![]));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations }
        .encode()
        .map_err(|e| InvoiceError::Export(format!("failed to encode page content: {e}")))?;
    Ok(doc.add_object(Stream::new(dictionary! {}, content)))
}

/// Split `line` into pieces no wider than `max_width` points.
///
/// Breaks at spaces; a word wider than a whole line is broken between
/// characters. Continuation lines keep the leading indentation.
fn wrap_line(line: &str, max_width: f32) -> Vec<String> {
    if text_width(line) <= max_width {
        return vec![line.to_string()];
    }

    let body = line.trim_start_matches(' ');
    let indent = &line[..line.len() - body.len()];
    let budget = max_width - text_width(indent);

    let mut wrapped = Vec::new();
    let mut current = String::new();
    for word in body.split(' ') {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate) <= budget {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            wrapped.push(std::mem::take(&mut current));
        }
        for c in word.chars() {
            current.push(c);
            if current.chars().count() > 1 && text_width(&current) > budget {
                current.pop();
                wrapped.push(std::mem::take(&mut current));
                current.push(c);
            }
        }
    }
    if !current.is_empty() || wrapped.is_empty() {
        wrapped.push(current);
    }

    wrapped
        .into_iter()
        .map(|piece| format!("{indent}{piece}"))
        .collect()
}

/// Rendered width of `text` in points at [`FONT_SIZE`].
fn text_width(text: &str) -> f32 {
    let units: u32 = encode_win_ansi(text)
        .into_iter()
        .map(|b| {
            let width = match b {
                0x20..=0x7E => HELVETICA_WIDTHS[(b - 0x20) as usize],
                _ => DEFAULT_GLYPH_WIDTH,
            };
            u32::from(width)
        })
        .sum();
    units as f32 * FONT_SIZE as f32 / 1000.0
}

/// Encode text for the standard WinAnsi font encoding.
///
/// Latin-1 passes through, the euro sign maps to its WinAnsi slot, the rupee
/// sign is spelled out and anything else becomes `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '€' => out.push(0x80),
            '₹' => out.extend_from_slice(b"Rs."),
            c if (c as u32) < 0x80 => out.push(c as u8),
            c if (0xA0..=0xFF).contains(&(c as u32)) => out.push(c as u32 as u8),
            _ => out.push(b'?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_ansi_mapping() {
        assert_eq!(encode_win_ansi("$10.00"), b"$10.00".to_vec());
        assert_eq!(encode_win_ansi("€5"), vec![0x80, b'5']);
        assert_eq!(encode_win_ansi("£1"), vec![0xA3, b'1']);
        assert_eq!(encode_win_ansi("₹9"), b"Rs.9".to_vec());
        assert_eq!(encode_win_ansi("₩"), b"?".to_vec());
    }

    #[test]
    fn short_lines_are_left_alone() {
        assert_eq!(wrap_line("Total: $22.00", 495.0), vec!["Total: $22.00"]);
        assert_eq!(wrap_line("", 495.0), vec![""]);
    }

    #[test]
    fn long_lines_wrap_at_spaces() {
        let line = "word ".repeat(300);
        let wrapped = wrap_line(line.trim_end(), 495.0);

        assert!(wrapped.len() > 1);
        for piece in &wrapped {
            assert!(text_width(piece) <= 495.0, "{piece:?} too wide");
        }
        let words: Vec<&str> = wrapped.iter().flat_map(|p| p.split_whitespace()).collect();
        assert_eq!(words.len(), 300);
        assert!(words.iter().all(|w| *w == "word"));
    }

    #[test]
    fn oversized_word_is_broken() {
        let word = "x".repeat(1000);
        let wrapped = wrap_line(&word, 495.0);
        // "x" is 5pt at 10pt Helvetica: 99 per line.
        assert_eq!(wrapped.len(), 11);
        assert_eq!(wrapped[0].len(), 99);
        assert_eq!(wrapped.concat(), word);
    }

    #[test]
    fn wrapped_lines_keep_indent() {
        let line = format!("  {}", "address ".repeat(100));
        let wrapped = wrap_line(line.trim_end(), 495.0);
        assert!(wrapped.len() > 1);
        assert!(wrapped.iter().all(|p| p.starts_with("  address")));
    }

    #[test]
    fn wrapping_adds_pages() {
        let long = "lorem ipsum ".repeat(400);
        let lines: Vec<String> = (0..50).map(|_| long.clone()).collect();
        let bytes = render(&lines, &ExportOptions::for_invoice("INV-1")).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().len() > 1);
    }

    #[test]
    fn long_documents_paginate() {
        let lines: Vec<String> = (0..200).map(|i| format!("line {i}")).collect();
        let bytes = render(&lines, &ExportOptions::for_invoice("INV-1")).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        // (842 - 100) / 14 = 53 lines per page
        assert_eq!(doc.get_pages().len(), 4);
    }
}
