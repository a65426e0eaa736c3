// DOCX files are ZIP archives of XML parts. docx-rs exposes the body as
//   Document -> DocumentChild::Paragraph -> ParagraphChild::Run -> RunChild::Text
// Runs may also sit inside ParagraphChild::Hyperlink, which nests its own
// paragraph children, or inside tracked insertions. Only body paragraphs contribute text; tables, images and
// headers are ignored.

use std::path::Path;

use docx_rs::{read_docx, DocumentChild, InsertChild, Paragraph, ParagraphChild, Run, RunChild};

use crate::extraction::ExtractionError;

/// Concatenates paragraph texts in document order, each followed by one space.
pub fn extract_docx_text(path: &Path) -> Result<String, ExtractionError> {
    let bytes = std::fs::read(path)?;
    let docx = read_docx(&bytes).map_err(|e| ExtractionError::Docx(format!("{e:?}")))?;

    let mut text = String::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(para) = child {
            text.push_str(&paragraph_text(para));
            text.push(' ');
        }
    }
    Ok(text)
}

/// Runs in a paragraph are fragments of the same line, joined without a separator.
fn paragraph_text(para: &Paragraph) -> String {
    let mut out = String::new();
    collect_text(&para.children, &mut out);
    out
}

fn collect_text(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => run_text(run, out),
            ParagraphChild::Hyperlink(link) => collect_text(&link.children, out),
            ParagraphChild::Insert(insert) => {
                for ic in &insert.children {
                    if let InsertChild::Run(run) = ic {
                        run_text(run, out);
                    }
                }
            }
            _ => {}
        }
    }
}

fn run_text(run: &Run, out: &mut String) {
    for rc in &run.children {
        if let RunChild::Text(t) = rc {
            out.push_str(&t.text);
        }
    }
}
