//! PNG decoding to and encoding from [`RgbaImage`](backdrop_fill::RgbaImage).

mod png_codec;

pub use png_codec::{decode_png, encode_png, ColorKind, DecodedImage, SourceColor};
