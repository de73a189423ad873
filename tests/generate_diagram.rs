//! Filesystem contract of the diagram generator.

use std::fs;
use std::thread;
use std::time::Duration;

use prisma_flow::generate_prisma_diagram_in;

#[test]
fn writes_a_png_and_creates_the_directory() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(!tmp.path().join("static").exists());

    let path = generate_prisma_diagram_in(tmp.path()).unwrap();

    assert!(path.ends_with("static/prisma_diagram.png"));
    assert!(path.is_file());

    let bytes = fs::read(&path).unwrap();
    assert!(!bytes.is_empty());
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    // 864 x 720 pt canvas rasterized at 300 dpi.
    let decoder = png::Decoder::new(std::io::Cursor::new(bytes.as_slice()));
    let reader = decoder.read_info().unwrap();
    let info = reader.info();
    assert_eq!((info.width, info.height), (3600, 3000));
    assert!(info.pixel_dims.is_some(), "density chunk present");
}

#[test]
fn rerendering_overwrites_the_same_path() {
    let tmp = tempfile::tempdir().unwrap();

    let first = generate_prisma_diagram_in(tmp.path()).unwrap();
    let first_mtime = fs::metadata(&first).unwrap().modified().unwrap();

    thread::sleep(Duration::from_millis(100));

    let second = generate_prisma_diagram_in(tmp.path()).unwrap();
    assert_eq!(first, second);

    let second_mtime = fs::metadata(&second).unwrap().modified().unwrap();
    assert!(second_mtime > first_mtime, "file is rewritten in place");
}

#[test]
fn unwritable_output_location_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    // Occupy the output directory's name with a plain file so directory
    // creation fails no matter which user runs the tests.
    fs::write(tmp.path().join("static"), b"in the way").unwrap();

    let err = generate_prisma_diagram_in(tmp.path()).unwrap_err();
    assert!(err.contains("Failed to create output directory"), "{err}");
    assert!(fs::read(tmp.path().join("static")).unwrap() == b"in the way");
}
