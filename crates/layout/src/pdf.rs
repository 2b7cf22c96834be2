//! Multi-page PDF serialization.
//!
//! Each rendered page canvas is JPEG-encoded and embedded as a full-page
//! image XObject scaled onto an A4 point MediaBox, so the 300 DPI raster
//! resolution carries through to print.

use framepress_common::{FramepressError, FramepressResult};
use image::RgbImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// A4 media box in 72-DPI points.
const MEDIA_WIDTH_PT: i64 = 595;
const MEDIA_HEIGHT_PT: i64 = 842;

/// Serialize the rendered pages into one PDF document.
pub fn write_document(pages: &[RgbImage]) -> FramepressResult<Vec<u8>> {
    if pages.is_empty() {
        return Err(FramepressError::render(
            "document must contain at least one page",
        ));
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());

    for page in pages {
        let (width, height) = page.dimensions();
        let jpeg = encode_jpeg(page)?;

        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width as i64,
                "Height" => height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            jpeg,
        ));

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        MEDIA_WIDTH_PT.into(),
                        0.into(),
                        0.into(),
                        MEDIA_HEIGHT_PT.into(),
                        0.into(),
                        0.into(),
                    ],
                ),
                Operation::new("Do", vec!["Im0".into()]),
                Operation::new("Q", vec![]),
            ],
        };
        let encoded = content
            .encode()
            .map_err(|e| FramepressError::render(format!("Failed to encode page content: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), MEDIA_WIDTH_PT.into(), MEDIA_HEIGHT_PT.into()],
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| FramepressError::render(format!("Failed to serialize PDF: {e}")))?;
    Ok(bytes)
}

fn encode_jpeg(page: &RgbImage) -> FramepressResult<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut bytes);
    image::DynamicImage::ImageRgb8(page.clone())
        .write_to(&mut cursor, image::ImageFormat::Jpeg)
        .map_err(|e| FramepressError::render(format!("Failed to encode page image: {e}")))?;
    Ok(bytes)
}
