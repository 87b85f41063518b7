//! Placeholder image assets.
//!
//! Every archive must carry an icon and a logo to be structurally
//! complete; when the caller supplies none, these minimal PNGs are
//! substituted.

use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

const DEFAULT_ICON_B64: &str = "iVBORw0KGgoAAAANSUhEUgAAADwAAAA8CAYAAAA6/NlyAAAACXBIWXMAAAsTAAALEwEAmpwYAAAAAXNSR0IArs4c6QAAAARnQU1BAACxjwv8YQUAAAGqSURBVHgB7ZrBDoIwDIa7+f6P7NmDMiYJHgQP4gPgxRvxYBQPxoNRPBgPRvFgPBhFQP/CLmQg3cY2xv+SJrAN7Fc6ugFQFEVRfpGyE8dxw8EB3uXNlrKw3eP7viHNIIqirCBPIvbsLMuaQZyUJEkbsl06zG0IIXmxzDMkeQCjKJoHQSBwnufP2ARWMCC7xPM8A5J30ZKN46VqNcHVKJyNiE2SpB96nicyT5dj7IZJkjwCLOshXMdpwI5OGDeQxC5b4lDCdh4EgYn+UzVJkj7AZoT3KNySW+VDSAeS1zRN1iFdXoNxM+h5npADwtihHsK9R8hO8eA+S9MUZFlm7xY3gF2FYVh3Hl2W5RgbBUAyEJZlCYIgsK9kYPFmUBL0CsIRPVPyjYJd2x0YsLNqA3YRBiF8M5x2gq0lB3Yd1hbG9h9C0gC7vEW0Bi8I3gdWA+vPMQySrG0PWLewbuqr0VjZWF8R0VqyMGmzwX8Z3hiyYBPDXODnkO0v5zluifSvWWJhMxLdFnAr0V2SHyG0S3JdhB9AKIoig/8BqGZNaKJbqowAAAAASUVORK5CYII=";

const DEFAULT_LOGO_B64: &str = "iVBORw0KGgoAAAANSUhEUgAAAPoAAABaCAYAAACse7pEAAAACXBIWXMAAAsTAAALEwEAmpwYAAAAAXNSR0IArs4c6QAAAARnQU1BAACxjwv8YQUAAAMSSURBVHgB7d0xchoxFIDhd+t0PgJH8BHcJT2NJ+NLuExqN27dZJhJnQN4SDrfwEdIQ7rEWwKy0EqLVrv/1wxgsZb9tJIW2M/r6+saAKb28/X1V/X59fUFABPz+f31tfb6+uoNYFLW//39/T+3v76+voH/mNV5xU7W/XK0QM86fHx8LJbLpZRlGb++vjb7Ga/+u7+/z3YON6fD+/v7bAKnB74/5D7V8eWoQ4d6HJumafz1x38qy1Le398X8/m8M2EYM7Bsz8d6CdSjejWbDf7x+Pi4cH2O71ePfHp6ehyT3DYdXl9f13d3d+LxGLN2fUf1CrvhVoMYm0Xuz2lXH/4gJ+twpzuD4xv/dF3HG7gBhKYRuk5w4+u+VK/M5/O5eD5FWX+37gH6sKM67NLh9/f3p5RRzh2/H7sXXfL/ukNcXl5KURTxSKe9K4LwSE/Xif58Pp/P9/f39Ww2kxc/Fwc70G+RnQ6bJq7EI4fAHrDXa4P9mCbIg+1o4dZbhEeQfddxHdjJ/pAFeyLI+5sPdtjnfdxgu9T2QL2fQ58xyK2xh+31NsIj2IVNDvDgP1e7n7HXU2JH+1pswCGD3fzd/d0xNTH4i9C2QE+6Qx6xNw74u9C2wGCDHerZdsht8Dv4k/4g/J0O/qSvwUZxRIDXyH7oDvZ4VIfeILuug+0fDiKDvmOQm8BGCO6zMQbZl3awQ/1f/Wev7+F0b2zwHbJbCH6Hwz+0BrtrC2TXZyewtzqsOvuaA50fQuSrH2Ln3VqD7LsGuhvkd1Jn+yE7DgnaWAP7c7BDhD5p63Dw0/bU18EOcH+oxVDn78eZNq8o8k8NdFewW+zzQUbo3+Q3fAg66Nfo/rS/X+J3cBv8RuiaQ/X+BpkXcti2fP8h2GFAn+Q3+BsJhLzYDbb7U/HQ2Q66tP01PkIN8jfsaBvkDvYHPKJ/0+fQ1wh00Lt1BQCm7P/wK/kkv9e/Ef6kTwH8XRxC91/H3LbYDlqD3cF+7+x8gWpHgPcFORQd7AfjxKA32BvD3LYdJH8J7I9hk92vw6DDb9fxO3+F/g38dR1/C+iHv7vD/wF/GofB7vDD/xD+uh3+F3D4FfgHXXR/CeQHPaR/C+gOOuR/D+gG2A5xBB3uT/qvYXd/Vf4fKOoZ6HaQxwLdIfg/4dB/H0H/C/B/gG6a8M8OAAAAASUVORK5CYII";

/// Decoded default icon bytes.
pub static DEFAULT_ICON: LazyLock<Vec<u8>> = LazyLock::new(|| {
    STANDARD
        .decode(DEFAULT_ICON_B64)
        .unwrap_or_else(|_| Vec::new())
});

/// Decoded default logo bytes.
pub static DEFAULT_LOGO: LazyLock<Vec<u8>> = LazyLock::new(|| {
    STANDARD
        .decode(DEFAULT_LOGO_B64)
        .unwrap_or_else(|_| Vec::new())
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_decode_to_png() {
        const PNG_MAGIC: [u8; 4] = [0x89, b'P', b'N', b'G'];
        assert_eq!(&DEFAULT_ICON[..4], &PNG_MAGIC);
        assert_eq!(&DEFAULT_LOGO[..4], &PNG_MAGIC);
    }
}
