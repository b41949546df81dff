//! Draw phase: replays a [`DocumentPlan`] into PDF bytes.
//!
//! The plan uses top-down coordinates; PDF space grows upward, so every y is
//! flipped against the page height here and nowhere else.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb,
};

use crate::error::{ClientError, Result};

use super::plan::{Align, DocumentPlan, Op, Rgb8, PAGE_HEIGHT, PAGE_WIDTH};
use super::plan::text_width;

fn color(c: Rgb8) -> Color {
    Color::Rgb(Rgb::new(
        c.0 as f64 / 255.0,
        c.1 as f64 / 255.0,
        c.2 as f64 / 255.0,
        None,
    ))
}

fn flip(y: f64) -> Mm {
    Mm(PAGE_HEIGHT - y)
}

fn rect_shape(x: f64, y: f64, width: f64, height: f64, filled: bool) -> Line {
    let top = flip(y);
    let bottom = flip(y + height);
    Line {
        points: vec![
            (Point::new(Mm(x), top), false),
            (Point::new(Mm(x + width), top), false),
            (Point::new(Mm(x + width), bottom), false),
            (Point::new(Mm(x), bottom), false),
        ],
        is_closed: true,
        has_fill: filled,
        has_stroke: !filled,
        is_clipping_path: false,
    }
}

fn draw(layer: &PdfLayerReference, op: &Op, regular: &IndirectFontRef, bold: &IndirectFontRef) {
    match op {
        Op::Rect {
            x,
            y,
            width,
            height,
            color: c,
            filled,
        } => {
            if *filled {
                layer.set_fill_color(color(*c));
            } else {
                layer.set_outline_color(color(*c));
                layer.set_outline_thickness(0.5);
            }
            layer.add_shape(rect_shape(*x, *y, *width, *height, *filled));
        }
        Op::Line {
            x1,
            y1,
            x2,
            y2,
            color: c,
            thickness,
        } => {
            layer.set_outline_color(color(*c));
            layer.set_outline_thickness(*thickness);
            layer.add_shape(Line {
                points: vec![
                    (Point::new(Mm(*x1), flip(*y1)), false),
                    (Point::new(Mm(*x2), flip(*y2)), false),
                ],
                is_closed: false,
                has_fill: false,
                has_stroke: true,
                is_clipping_path: false,
            });
        }
        Op::Text {
            x,
            y,
            size,
            bold: is_bold,
            color: c,
            align,
            content,
        } => {
            let font = if *is_bold { bold } else { regular };
            let x = match align {
                Align::Left => *x,
                Align::Center => x - text_width(content, *size) / 2.0,
            };
            layer.set_fill_color(color(*c));
            layer.use_text(content.clone(), *size, Mm(x), flip(*y), font);
        }
    }
}

/// Renders every page of the plan into a single PDF byte buffer.
pub fn render_plan(plan: &DocumentPlan) -> Result<Vec<u8>> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "Technovaganza 2025 - Participation Certificate",
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "content",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ClientError::Render(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ClientError::Render(e.to_string()))?;

    for (index, page) in plan.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) =
                doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "content");
            doc.get_page(page_index).get_layer(layer_index)
        };
        for op in &page.ops {
            draw(&layer, op, &regular, &bold);
        }
    }

    doc.save_to_bytes()
        .map_err(|e| ClientError::Render(e.to_string()))
}
