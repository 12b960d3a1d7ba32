/// Error correction level, ordered from the least to the most robust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Ecl {
    /// Low: 7% recovery rate.
    L,
    /// Medium: 15% recovery rate.
    M,
    /// Quartile: 25% recovery rate.
    Q,
    /// High: 30% recovery rate.
    H,
}

impl std::fmt::Display for Ecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        };
        write!(f, "{}", letter)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Ecl::L < Ecl::M && Ecl::M < Ecl::Q && Ecl::Q < Ecl::H);
        let mut levels = [Ecl::H, Ecl::L, Ecl::Q, Ecl::M];
        levels.sort();
        assert_eq!(levels, [Ecl::L, Ecl::M, Ecl::Q, Ecl::H]);
    }

    #[test]
    fn test_display() {
        let letters: String = [Ecl::L, Ecl::M, Ecl::Q, Ecl::H]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(letters, "LMQH");
    }
}
