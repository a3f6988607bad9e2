use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ParseTokenError;

macro_rules! token_enum {
    (
        $name:ident, $err:ident {
            $($variant:ident => ($wire:literal, $label:literal)),+ $(,)?
        }
    ) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Value sent on the wire.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            /// Human facing label.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseTokenError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let needle = raw.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|value| {
                        value.as_str().eq_ignore_ascii_case(needle)
                            || value.label().eq_ignore_ascii_case(needle)
                    })
                    .ok_or_else(|| ParseTokenError::$err(raw.to_string()))
            }
        }
    };
}

token_enum!(Quarter, Quarter {
    Fall2025 => ("Fall 2025", "Fall 2025"),
    Winter2026 => ("Winter 2026", "Winter 2026"),
    Spring2026 => ("Spring 2026", "Spring 2026"),
});

token_enum!(Weekday, Weekday {
    Monday => ("monday", "Monday"),
    Tuesday => ("tuesday", "Tuesday"),
    Wednesday => ("wednesday", "Wednesday"),
    Thursday => ("thursday", "Thursday"),
    Friday => ("friday", "Friday"),
});

token_enum!(TimeBlock, TimeBlock {
    Morning => ("morning", "Morning"),
    Afternoon => ("afternoon", "Afternoon"),
    Evening => ("evening", "Evening"),
});

impl Weekday {
    pub fn short_label(self) -> &'static str {
        &self.label()[..3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_values_and_labels_case_insensitively() {
        assert_eq!("Fall 2025".parse::<Quarter>().expect("quarter"), Quarter::Fall2025);
        assert_eq!(" winter 2026 ".parse::<Quarter>().expect("quarter"), Quarter::Winter2026);
        assert_eq!("MONDAY".parse::<Weekday>().expect("day"), Weekday::Monday);
        assert_eq!("Evening".parse::<TimeBlock>().expect("time"), TimeBlock::Evening);
    }

    #[test]
    fn rejects_unknown_tokens_with_the_offending_value() {
        let err = "saturday".parse::<Weekday>().expect_err("weekend is not offered");
        assert_eq!(err, ParseTokenError::Weekday("saturday".to_string()));
        assert!(err.to_string().contains("saturday"));
    }

    #[test]
    fn serializes_to_wire_tokens() {
        assert_eq!(
            serde_json::to_string(&Quarter::Spring2026).expect("json"),
            "\"Spring 2026\""
        );
        assert_eq!(
            serde_json::to_string(&Weekday::Thursday).expect("json"),
            "\"thursday\""
        );
    }

    #[test]
    fn orders_weekdays_and_time_blocks_chronologically() {
        let mut days = vec![Weekday::Friday, Weekday::Monday, Weekday::Wednesday];
        days.sort();
        assert_eq!(days, vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday]);
        assert!(TimeBlock::Morning < TimeBlock::Evening);
        assert_eq!(Weekday::Tuesday.short_label(), "Tue");
    }
}
