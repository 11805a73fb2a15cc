//! A synthetic `data/` tree shared by the integration tests.

#![allow(dead_code)]

use image::{Rgb, RgbImage};
use std::{fs, path::Path};
use tempfile::TempDir;

pub const ROOMS: [&str; 5] = ["Bathroom", "Bedroom", "Dinning", "Kitchen", "Livingroom"];
pub const IMAGES_PER_ROOM: usize = 2;

pub fn save_image(path: impl AsRef<Path>, width: u32, height: u32) {
    let path = path.as_ref();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width) as u8, (y * 255 / height) as u8, 128])
    })
    .save(path)
    .unwrap();
}

fn write(path: impl AsRef<Path>, text: &str) {
    let path = path.as_ref();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

/// Lay out all datasets under `<root>/data`.
///
/// - hand-labeled faces: `b.jpg` and `a.jpg` are labeled and present, `c.jpg`
///   has no label and `d.jpg` has no image. `a.jpg` is listed twice.
/// - CSV faces: `x.jpg` exists, `missing.jpg` does not.
/// - rooms: two images per category.
/// - triplets: one row.
pub fn build_data_tree() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    let data = root.path().join("data");

    let hand = data.join("human-faces-object-detection");
    save_image(hand.join("images/a.jpg"), 200, 200);
    save_image(hand.join("images/b.jpg"), 300, 150);
    save_image(hand.join("images/c.jpg"), 64, 64);
    write(
        hand.join("faces.csv"),
        "image_name,width,height,x0,y0,x1,y1\n\
         b.jpg,300,150,30,15,150,120\n\
         a.jpg,200,200,10,20,110,120\n\
         d.jpg,100,100,0,0,50,50\n\
         a.jpg,200,200,0,0,20,20\n",
    );

    let csv = data.join("face-detection-dataset");
    save_image(csv.join("images/x.jpg"), 100, 50);
    write(
        csv.join("labels_and_coordinates.csv"),
        "image,x0,y0,x1,y1\n\
         x.jpg,10,5,60,40\n\
         missing.jpg,1,1,2,2\n",
    );

    let rooms = data.join("house-rooms-image-dataset/House_Room_Dataset");
    for room in ROOMS {
        for index in 0..IMAGES_PER_ROOM {
            save_image(rooms.join(room).join(format!("{}_{}.png", room, index)), 40, 30);
        }
    }

    let celeb = data.join("celeba-face-recognition-triplets");
    save_image(celeb.join("images/anchor.jpg"), 50, 60);
    save_image(celeb.join("images/positive.jpg"), 40, 40);
    save_image(celeb.join("images/negative.jpg"), 70, 30);
    write(
        celeb.join("triplets.csv"),
        "anchor,pos,neg,identity\n\
         anchor.jpg,positive.jpg,negative.jpg,7\n",
    );

    root
}
