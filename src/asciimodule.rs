// ASCII art module for flagfetch
// Built-in templates in neofetch's ${cN} placeholder format

// Test cat shown in previews, `{txt}` is replaced by a 5 column label
const ASCII_TEST_CAT: &str = include_str!("assets/cat.txt");

// Distro logos
const ASCII_ART_ARCH: &str = include_str!("assets/arch.txt");
const ASCII_ART_FEDORA: &str = include_str!("assets/fedora.txt");
const ASCII_ART_UBUNTU: &str = include_str!("assets/ubuntu.txt");
const ASCII_ART_MAGIX: &str = include_str!("assets/magix.txt");

pub const TEST_LABEL_WIDTH: usize = 5;

// Names accepted by get_distro_logo, for help output
pub const DISTROS: &[&str] = &["arch", "fedora", "ubuntu", "magix"];

// Distros whose art works best with one slot as outline and one as fill.
// (fore slot, back slot), matched by prefix.
const FORE_BACK: &[(&str, (u8, u8))] = &[
    ("fedora", (2, 1)),
    ("kubuntu", (2, 1)),
    ("lubuntu", (2, 1)),
    ("xubuntu", (2, 1)),
    ("ubuntu-cinnamon", (2, 1)),
    ("ubuntu-kylin", (2, 1)),
    ("ubuntu-mate", (2, 1)),
    ("ubuntu-studio", (2, 1)),
    ("ubuntu-sway", (2, 1)),
];

// Files end with a newline, the art doesn't
fn art(raw: &'static str) -> &'static str {
    raw.trim_end_matches('\n')
}

// Test cat with a centered label like "50%"
pub fn test_ascii(label: &str) -> String {
    let label: String = label.chars().take(TEST_LABEL_WIDTH).collect();
    let padded = format!("{label:^width$}", width = TEST_LABEL_WIDTH);
    art(ASCII_TEST_CAT).replace("{txt}", &padded)
}

// Get distro art if available, returns None if no match
pub fn get_distro_logo(distro: &str) -> Option<&'static str> {
    let distro = distro.to_lowercase();
    let raw = if distro.contains("arch") {
        ASCII_ART_ARCH
    } else if distro.contains("fedora") {
        ASCII_ART_FEDORA
    } else if distro.contains("ubuntu") {
        ASCII_ART_UBUNTU
    } else if distro.contains("magix") {
        ASCII_ART_MAGIX
    } else {
        return None;
    };
    Some(art(raw))
}

// Recommended (fore, back) slots for a distro, None if its art isn't built for it
pub fn get_fore_back(distro: &str) -> Option<(u8, u8)> {
    let distro = distro.to_lowercase().replace(' ', "-");
    FORE_BACK
        .iter()
        .find(|(prefix, _)| distro.starts_with(prefix))
        .map(|&(_, slots)| slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{ascii_size, normalize};

    #[test]
    fn looks_up_logos_loosely() {
        assert!(get_distro_logo("Arch Linux").is_some());
        assert!(get_distro_logo("Fedora Linux 40").is_some());
        assert!(get_distro_logo("TempleOS").is_none());
    }

    #[test]
    fn logos_have_no_trailing_blank_line() {
        for distro in DISTROS {
            let logo = get_distro_logo(distro).unwrap();
            assert!(!logo.ends_with('\n'), "{distro}");
            assert!(normalize(logo).slots().contains(&1), "{distro}");
        }
    }

    #[test]
    fn test_ascii_keeps_its_width() {
        let plain = ascii_size(&test_ascii(""));
        assert_eq!(ascii_size(&test_ascii("50%")), plain);
        assert_eq!(ascii_size(&test_ascii("way too long")), plain);
        assert!(test_ascii("50%").contains(" 50% "));
    }

    #[test]
    fn fore_back_matches_prefixes() {
        assert_eq!(get_fore_back("Fedora"), Some((2, 1)));
        assert_eq!(get_fore_back("Ubuntu MATE"), Some((2, 1)));
        assert_eq!(get_fore_back("ubuntu"), None);
        assert_eq!(get_fore_back("arch"), None);
    }
}
