//! Window icon, drawn at startup: a monitor with a lit screen.

use image::{Rgba, RgbaImage};

const SIZE: u32 = 32;

const BEZEL: Rgba<u8> = Rgba([40, 44, 52, 255]);
const SCREEN: Rgba<u8> = Rgba([0, 170, 220, 255]);
const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

pub fn window_icon() -> eframe::IconData {
    let image = RgbaImage::from_fn(SIZE, SIZE, pixel);
    let (width, height) = image.dimensions();

    eframe::IconData {
        rgba: image.into_raw(),
        width,
        height,
    }
}

fn pixel(x: u32, y: u32) -> Rgba<u8> {
    let in_bezel = (2..30).contains(&x) && (4..24).contains(&y);
    let in_screen = (4..28).contains(&x) && (6..22).contains(&y);
    let in_stand = (14..18).contains(&x) && (24..27).contains(&y);
    let in_base = (9..23).contains(&x) && (27..29).contains(&y);

    if in_screen {
        SCREEN
    } else if in_bezel || in_stand || in_base {
        BEZEL
    } else {
        CLEAR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_is_square_rgba() {
        let icon = window_icon();
        assert_eq!((icon.width, icon.height), (SIZE, SIZE));
        assert_eq!(icon.rgba.len(), (SIZE * SIZE * 4) as usize);
    }

    #[test]
    fn corners_are_transparent() {
        assert_eq!(pixel(0, 0), CLEAR);
        assert_eq!(pixel(SIZE - 1, SIZE - 1), CLEAR);
        assert_eq!(pixel(16, 12), SCREEN);
    }
}
