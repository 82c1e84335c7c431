//! Structural legality of a layer stack.
//!
//! A working LCD, read from the back of the display to the front, needs a
//! backlight, a polarizer, the transistor array, the liquid crystal and a
//! second polarizer.  The pattern has a wildcard slot between the transistor
//! array and the liquid crystal that is skipped over without consuming a
//! layer.  Glass is transparent to the pattern: it may appear before, between
//! or after the core layers, except while the cursor sits on the wildcard slot.
//!
//! Whether the outermost layer is glass is checked separately by the glass
//! gate in [`check`](super::check).

use crate::domain::catalog::LayerKind;

/// The canonical six-slot LCD pattern.  [`LayerKind::None`] marks the wildcard.
pub const LCD_PATTERN: [LayerKind; 6] = [
    LayerKind::Backlight,
    LayerKind::Polarizer,
    LayerKind::TftArray,
    LayerKind::None,
    LayerKind::LiquidCrystal,
    LayerKind::Polarizer,
];

/// Returns `true` if `kinds` (back to front) walks the cursor through the
/// whole [`LCD_PATTERN`].
///
/// An empty stack, or one holding only glass, never advances the cursor and is
/// therefore invalid.  Any non-glass layer after the pattern is complete makes
/// the stack invalid.
pub fn is_valid_lcd_structure<I>(kinds: I) -> bool
where
    I: IntoIterator<Item = LayerKind>,
{
    let mut cursor = 0;

    for kind in kinds {
        if kind != LayerKind::Glass {
            if cursor >= LCD_PATTERN.len() {
                return false;
            }
            if LCD_PATTERN[cursor] == LayerKind::None {
                cursor += 1;
            }
            if kind != LCD_PATTERN[cursor] {
                return false;
            }
            cursor += 1;
        } else if cursor < LCD_PATTERN.len() && LCD_PATTERN[cursor] == LayerKind::None {
            return false;
        }
    }

    cursor == LCD_PATTERN.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use LayerKind::{Backlight, Glass, LiquidCrystal, Polarizer, TftArray};

    const CORE: [LayerKind; 5] = [Backlight, Polarizer, TftArray, LiquidCrystal, Polarizer];

    #[test]
    fn test_core_sequence_is_valid() {
        assert!(is_valid_lcd_structure(CORE));
    }

    #[test]
    fn test_core_sequence_with_outer_glass_is_valid() {
        assert!(is_valid_lcd_structure([
            Backlight, Polarizer, TftArray, LiquidCrystal, Polarizer, Glass
        ]));
    }

    #[test]
    fn test_empty_stack_is_invalid() {
        assert!(!is_valid_lcd_structure(Vec::<LayerKind>::new()));
    }

    #[test]
    fn test_glass_only_stack_is_invalid() {
        assert!(!is_valid_lcd_structure([Glass, Glass, Glass]));
    }

    #[test]
    fn test_glass_before_and_between_core_layers_is_valid() {
        assert!(is_valid_lcd_structure([
            Glass, Backlight, Glass, Polarizer, Glass, TftArray, LiquidCrystal, Glass, Polarizer,
            Glass, Glass
        ]));
    }

    #[test]
    fn test_glass_in_wildcard_gap_is_invalid() {
        assert!(!is_valid_lcd_structure([
            Backlight, Polarizer, TftArray, Glass, LiquidCrystal, Polarizer, Glass
        ]));
    }

    #[test]
    fn test_non_glass_after_completed_pattern_is_invalid() {
        assert!(!is_valid_lcd_structure([
            Backlight, Polarizer, TftArray, LiquidCrystal, Polarizer, Glass, Polarizer
        ]));
    }

    #[test]
    fn test_out_of_order_layers_are_invalid() {
        assert!(!is_valid_lcd_structure([
            Backlight, TftArray, Polarizer, LiquidCrystal, Polarizer, Glass
        ]));
    }

    #[test]
    fn test_incomplete_pattern_is_invalid() {
        assert!(!is_valid_lcd_structure([Backlight, Polarizer, TftArray, Glass]));
        assert!(!is_valid_lcd_structure([Backlight, Polarizer, TftArray, LiquidCrystal, Glass]));
    }

    #[test]
    fn test_wildcard_marker_is_never_matched_as_a_layer() {
        assert!(!is_valid_lcd_structure([
            Backlight,
            Polarizer,
            TftArray,
            LayerKind::None,
            LiquidCrystal,
            Polarizer
        ]));
    }

    /// Exhaustively compares the cursor walk with a direct description of
    /// legal stacks over every sequence of up to seven placeable kinds.
    #[test]
    fn test_matches_reference_rule_for_all_short_stacks() {
        const KINDS: [LayerKind; 5] = [Backlight, TftArray, LiquidCrystal, Polarizer, Glass];

        fn reference(stack: &[LayerKind]) -> bool {
            let core: Vec<LayerKind> = stack.iter().copied().filter(|k| *k != Glass).collect();
            if core != CORE {
                return false;
            }
            // No glass between the transistor array and the liquid crystal.
            let tft = stack.iter().position(|k| *k == TftArray);
            let lc = stack.iter().position(|k| *k == LiquidCrystal);
            match (tft, lc) {
                (Some(t), Some(l)) => stack[t + 1..l].is_empty(),
                _ => false,
            }
        }

        let mut checked = 0;
        for len in 0..=7u32 {
            for mut code in 0..KINDS.len().pow(len) {
                let mut stack = Vec::with_capacity(len as usize);
                for _ in 0..len {
                    stack.push(KINDS[code % KINDS.len()]);
                    code /= KINDS.len();
                }
                assert_eq!(
                    is_valid_lcd_structure(stack.iter().copied()),
                    reference(&stack),
                    "disagreement on {stack:?}"
                );
                checked += 1;
            }
        }
        assert!(checked > 90_000);
    }
}
