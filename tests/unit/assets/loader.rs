use std::io::Cursor;

use super::*;

fn png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("adframe-{name}-{}", std::process::id()));
    std::fs::create_dir_all(dir.join("images")).unwrap();
    dir
}

#[test]
fn parse_distinguishes_paths_and_data_urls() {
    assert_eq!(
        ImageSource::parse("/images/mask.png").unwrap(),
        ImageSource::path("/images/mask.png")
    );
    let src = ImageSource::parse("data:text/plain,abc").unwrap();
    assert_eq!(src, ImageSource::encoded(b"abc".to_vec()));
    assert_eq!(src.describe(), "<3 encoded bytes>");
    assert!(ImageSource::parse("   ").is_err());
}

#[test]
fn fs_loader_reads_site_rooted_paths() {
    let dir = scratch_dir("fs-loader");
    std::fs::write(dir.join("images/mask.png"), png(3, 2, [0, 0, 0, 255])).unwrap();

    let loader = FsImageLoader::new(&dir);
    let loaded =
        pollster::block_on(loader.load(&ImageSource::path("/images/mask.png"))).unwrap();
    let PreparedAsset::Image(img) = loaded else {
        panic!("expected raster image");
    };
    assert_eq!((img.width, img.height), (3, 2));

    assert!(pollster::block_on(loader.load(&ImageSource::path("images/missing.png"))).is_err());
    assert!(pollster::block_on(loader.load(&ImageSource::path("../etc/passwd"))).is_err());
    assert!(
        pollster::block_on(loader.load(&ImageSource::path("https://cdn.example.com/a.png")))
            .is_err()
    );

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn memory_loader_serves_registered_paths_and_encoded_bytes() {
    let mut loader = MemoryImageLoader::new();
    loader.insert("/a/pattern.png", png(1, 1, [1, 2, 3, 255])).unwrap();

    assert!(pollster::block_on(loader.load(&ImageSource::path("a/pattern.png"))).is_ok());
    assert!(pollster::block_on(loader.load(&ImageSource::path("a/other.png"))).is_err());

    let encoded = ImageSource::encoded(png(2, 2, [0, 0, 0, 0]));
    assert!(pollster::block_on(loader.load(&encoded)).is_ok());
    let garbage = ImageSource::encoded(b"nope".to_vec());
    assert!(pollster::block_on(loader.load(&garbage)).is_err());
}

#[test]
fn fs_loader_reports_remote_references_as_decode_errors() {
    let loader = FsImageLoader::new(".");
    for reference in [
        "https://cdn.example.com/a.png",
        "HTTP://cdn.example.com/a.png",
        "//cdn.example.com/a.png",
    ] {
        let err = pollster::block_on(loader.load(&ImageSource::path(reference))).unwrap_err();
        assert!(matches!(err, AdframeError::Decode(_)), "{reference}: {err}");
        assert!(err.to_string().contains("remote"), "{reference}: {err}");
    }
}
