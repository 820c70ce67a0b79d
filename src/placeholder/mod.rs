//! Image placeholders: a uniform gray box versus a blurhash preview.

mod case;

pub use case::{ImageLoadingCase, ImagePhase, PlaceholderImage};

use crate::fetch::Latency;
use crate::view::ViewMode;

/// Shortest and longest simulated wait before an image is requested.
pub const REVEAL_DELAY_MIN_MS: u64 = 700;
pub const REVEAL_DELAY_MAX_MS: u64 = 1200;

pub fn reveal_delay() -> Latency {
    Latency::from_millis_range(REVEAL_DELAY_MIN_MS, REVEAL_DELAY_MAX_MS)
}

/// A profile picture of the case together with its precomputed blurhash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileImage {
    pub url: &'static str,
    pub blurhash: &'static str,
}

pub const PROFILE_IMAGES: [ProfileImage; 4] = [
    ProfileImage {
        url: "https://storage.googleapis.com/the-better-ux/image-loading-blurhash/profile-1.png",
        blurhash: ":VJ8Lut7%g9ZIBV@ozW;~WxukXR*DiWAWBofIotRi_oJxvWBjYoJW=WCs.V@ozoga#oft7aeaea}M{WCofofogt7RjaekCWBs:oJoft7WXRjoJf6RkayxuofWBWBayj[RjWB",
    },
    ProfileImage {
        url: "https://storage.googleapis.com/the-better-ux/image-loading-blurhash/profile-2.png",
        blurhash: ":fO:w*jZ?wbIR5oLNGayD*bH%1aeR*ofaxayo~ofROWCW=j[t7a}%2j@NHWVoJj[offQxuj[M{ayt7j]WBfRoIaeR*oft7aeRjayozazaeoLj[azWVj[ayayfPofWBWBofj[",
    },
    ProfileImage {
        url: "https://storage.googleapis.com/the-better-ux/image-loading-blurhash/profile-3.png",
        blurhash: ":QIqP|IU0fs,wHs:n%bI00^+%goLt6R*f6WV.TRk,:NFIpoeW=of9ut7w]%3RkoMbcayaet7xvNGWVWBoLj[-=NHR%WBNat7aeofafX9R-t7jZRks:axozt8bbNGn$WBoeof",
    },
    ProfileImage {
        url: "https://storage.googleapis.com/the-better-ux/image-loading-blurhash/profile-4.png",
        blurhash: ":SKK$qoz.TkCwHoeShj]~qWBM_WVIUjsWBay0KjsnMoftSbHxaj[.8ayR*jZoLWBRjoLjFj[M{j[j[ofoLfPRjj[t7WBt7oeRjWBofjtbHWVRioLWVa}Rjays:kCj[f6t7WB",
    },
];

/// What fills an image's slot until the image itself has loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// Same flat box for every image (Don't view).
    Gray,
    /// A blurred preview of this image (Do view).
    Blurhash(&'static str),
}

impl PlaceholderKind {
    pub fn for_view(view: ViewMode, image: &ProfileImage) -> Self {
        match view {
            ViewMode::Do => PlaceholderKind::Blurhash(image.blurhash),
            ViewMode::Dont => PlaceholderKind::Gray,
        }
    }
}

/// Alt text of the `index`th (zero-based) profile image.
pub fn alt_text(view: ViewMode, index: usize) -> String {
    let n = index + 1;
    match view {
        ViewMode::Do => {
            format!("Profile {n} - good example with blurhash preview for smooth loading")
        }
        ViewMode::Dont => {
            format!("Profile {n} - bad example with no visual preview while loading")
        }
    }
}
