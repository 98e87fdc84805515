mod image_io;
mod png_io;

pub use image_io::{
    decode_image, encode_jpeg, load_image, output_format, save_image, ImageFormat, SaveOptions,
};
pub use png_io::{decode_png, encode_png, load_png, optimize_png, save_png};
