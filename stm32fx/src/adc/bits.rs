//! Raw bit positions and masks of the series-independent ADC registers.
//!
//! The `*_BIT` constants are bit positions, the other constants are masks which are already
//! shifted into place. Series-specific fields live in [super::f1::bits] and [super::f2::bits].

/// Returns `true` if none of the passed masks share a bit.
pub const fn masks_disjoint(masks: &[u32]) -> bool {
    let mut seen = 0;
    let mut i = 0;
    while i < masks.len() {
        if seen & masks[i] != 0 {
            return false;
        }
        seen |= masks[i];
        i += 1;
    }
    true
}

// Status register

pub const SR_AWD_BIT: u32 = 0;
pub const SR_EOC_BIT: u32 = 1;
pub const SR_JEOC_BIT: u32 = 2;
pub const SR_JSTRT_BIT: u32 = 3;
pub const SR_STRT_BIT: u32 = 4;

pub const SR_AWD: u32 = 1 << SR_AWD_BIT;
pub const SR_EOC: u32 = 1 << SR_EOC_BIT;
pub const SR_JEOC: u32 = 1 << SR_JEOC_BIT;
pub const SR_JSTRT: u32 = 1 << SR_JSTRT_BIT;
pub const SR_STRT: u32 = 1 << SR_STRT_BIT;

// Control register 1

pub const CR1_EOCIE_BIT: u32 = 5;
pub const CR1_AWDIE_BIT: u32 = 6;
pub const CR1_JEOCIE_BIT: u32 = 7;
pub const CR1_SCAN_BIT: u32 = 8;
pub const CR1_AWDSGL_BIT: u32 = 9;
pub const CR1_JAUTO_BIT: u32 = 10;
pub const CR1_DISCEN_BIT: u32 = 11;
pub const CR1_JDISCEN_BIT: u32 = 12;
pub const CR1_DISCNUM_SHIFT: u32 = 13;
pub const CR1_JAWDEN_BIT: u32 = 22;
pub const CR1_AWDEN_BIT: u32 = 23;

pub const CR1_AWDCH: u32 = 0x1F;
pub const CR1_EOCIE: u32 = 1 << CR1_EOCIE_BIT;
pub const CR1_AWDIE: u32 = 1 << CR1_AWDIE_BIT;
pub const CR1_JEOCIE: u32 = 1 << CR1_JEOCIE_BIT;
pub const CR1_SCAN: u32 = 1 << CR1_SCAN_BIT;
pub const CR1_AWDSGL: u32 = 1 << CR1_AWDSGL_BIT;
pub const CR1_JAUTO: u32 = 1 << CR1_JAUTO_BIT;
pub const CR1_DISCEN: u32 = 1 << CR1_DISCEN_BIT;
pub const CR1_JDISCEN: u32 = 1 << CR1_JDISCEN_BIT;
pub const CR1_DISCNUM: u32 = 0x7 << CR1_DISCNUM_SHIFT;
pub const CR1_JAWDEN: u32 = 1 << CR1_JAWDEN_BIT;
pub const CR1_AWDEN: u32 = 1 << CR1_AWDEN_BIT;

// Control register 2, bits shared by all series.

pub const CR2_ADON_BIT: u32 = 0;
pub const CR2_CONT_BIT: u32 = 1;
pub const CR2_DMA_BIT: u32 = 8;
pub const CR2_ALIGN_BIT: u32 = 11;

pub const CR2_ADON: u32 = 1 << CR2_ADON_BIT;
pub const CR2_CONT: u32 = 1 << CR2_CONT_BIT;
pub const CR2_DMA: u32 = 1 << CR2_DMA_BIT;
pub const CR2_ALIGN: u32 = 1 << CR2_ALIGN_BIT;

// Sample time registers. Every channel uses a 3-bit field.

pub const SMP_FIELD_WIDTH: u32 = 3;
pub const SMP_FIELD_MASK: u32 = 0x7;
/// Number of channel fields in SMPR2, which holds the channels starting at 0.
pub const SMPR2_CHANNELS: u8 = 10;

pub const SMPR1_SMP17: u32 = 0x7 << 21;
pub const SMPR1_SMP16: u32 = 0x7 << 18;
pub const SMPR1_SMP15: u32 = 0x7 << 15;
pub const SMPR1_SMP14: u32 = 0x7 << 12;
pub const SMPR1_SMP13: u32 = 0x7 << 9;
pub const SMPR1_SMP12: u32 = 0x7 << 6;
pub const SMPR1_SMP11: u32 = 0x7 << 3;
pub const SMPR1_SMP10: u32 = 0x7;

pub const SMPR2_SMP9: u32 = 0x7 << 27;
pub const SMPR2_SMP8: u32 = 0x7 << 24;
pub const SMPR2_SMP7: u32 = 0x7 << 21;
pub const SMPR2_SMP6: u32 = 0x7 << 18;
pub const SMPR2_SMP5: u32 = 0x7 << 15;
pub const SMPR2_SMP4: u32 = 0x7 << 12;
pub const SMPR2_SMP3: u32 = 0x7 << 9;
pub const SMPR2_SMP2: u32 = 0x7 << 6;
pub const SMPR2_SMP1: u32 = 0x7 << 3;
pub const SMPR2_SMP0: u32 = 0x7;

// Injected channel data offset registers

pub const JOFR_JOFFSET: u32 = 0xFFF;

// Watchdog threshold registers

pub const HTR_HT: u32 = 0xFFF;
pub const LTR_LT: u32 = 0xFFF;

// Sequence registers. Every sequence slot uses a 5-bit field.

pub const SQ_FIELD_WIDTH: u32 = 5;
pub const SQ_FIELD_MASK: u32 = 0x1F;
/// Number of sequence slots in each of SQR3, SQR2 and SQR1.
pub const SQR3_SLOTS: usize = 6;
pub const SQR2_SLOTS: usize = 6;
pub const SQR1_SLOTS: usize = 4;
/// Maximum regular sequence length.
pub const MAX_REGULAR_SEQUENCE_LEN: usize = SQR3_SLOTS + SQR2_SLOTS + SQR1_SLOTS;

pub const SQR1_L_SHIFT: u32 = 20;
pub const SQR1_L: u32 = 0xF << SQR1_L_SHIFT;
pub const SQR1_SQ16: u32 = 0x1F << 15;
pub const SQR1_SQ15: u32 = 0x1F << 10;
pub const SQR1_SQ14: u32 = 0x1F << 5;
pub const SQR1_SQ13: u32 = 0x1F;

pub const SQR2_SQ12: u32 = 0x1F << 25;
pub const SQR2_SQ11: u32 = 0x1F << 20;
pub const SQR2_SQ10: u32 = 0x1F << 15;
pub const SQR2_SQ9: u32 = 0x1F << 10;
pub const SQR2_SQ8: u32 = 0x1F << 5;
pub const SQR2_SQ7: u32 = 0x1F;

pub const SQR3_SQ6: u32 = 0x1F << 25;
pub const SQR3_SQ5: u32 = 0x1F << 20;
pub const SQR3_SQ4: u32 = 0x1F << 15;
pub const SQR3_SQ3: u32 = 0x1F << 10;
pub const SQR3_SQ2: u32 = 0x1F << 5;
pub const SQR3_SQ1: u32 = 0x1F;

// Injected sequence register

pub const JSQR_JL_SHIFT: u32 = 20;
pub const JSQR_JL: u32 = 0x3 << JSQR_JL_SHIFT;
pub const JSQR_JL_1CONV: u32 = 0x0 << JSQR_JL_SHIFT;
pub const JSQR_JL_2CONV: u32 = 0x1 << JSQR_JL_SHIFT;
pub const JSQR_JL_3CONV: u32 = 0x2 << JSQR_JL_SHIFT;
pub const JSQR_JL_4CONV: u32 = 0x3 << JSQR_JL_SHIFT;
pub const JSQR_JSQ4: u32 = 0x1F << 15;
pub const JSQR_JSQ3: u32 = 0x1F << 10;
pub const JSQR_JSQ2: u32 = 0x1F << 5;
pub const JSQR_JSQ1: u32 = 0x1F;

// Injected data registers

pub const JDR_JDATA: u32 = 0xFFFF;

// Regular data register

pub const DR_ADC2DATA: u32 = 0xFFFF << 16;
pub const DR_DATA: u32 = 0xFFFF;

static_assertions::const_assert!(masks_disjoint(&[
    SR_AWD, SR_EOC, SR_JEOC, SR_JSTRT, SR_STRT
]));
static_assertions::const_assert!(masks_disjoint(&[
    CR1_AWDCH,
    CR1_EOCIE,
    CR1_AWDIE,
    CR1_JEOCIE,
    CR1_SCAN,
    CR1_AWDSGL,
    CR1_JAUTO,
    CR1_DISCEN,
    CR1_JDISCEN,
    CR1_DISCNUM,
    CR1_JAWDEN,
    CR1_AWDEN,
]));
static_assertions::const_assert!(masks_disjoint(&[CR2_ADON, CR2_CONT, CR2_DMA, CR2_ALIGN]));
static_assertions::const_assert!(masks_disjoint(&[
    SMPR1_SMP17,
    SMPR1_SMP16,
    SMPR1_SMP15,
    SMPR1_SMP14,
    SMPR1_SMP13,
    SMPR1_SMP12,
    SMPR1_SMP11,
    SMPR1_SMP10,
]));
static_assertions::const_assert!(masks_disjoint(&[
    SMPR2_SMP9, SMPR2_SMP8, SMPR2_SMP7, SMPR2_SMP6, SMPR2_SMP5, SMPR2_SMP4, SMPR2_SMP3,
    SMPR2_SMP2, SMPR2_SMP1, SMPR2_SMP0,
]));
static_assertions::const_assert!(masks_disjoint(&[
    SQR1_L, SQR1_SQ16, SQR1_SQ15, SQR1_SQ14, SQR1_SQ13
]));
static_assertions::const_assert!(masks_disjoint(&[
    SQR2_SQ12, SQR2_SQ11, SQR2_SQ10, SQR2_SQ9, SQR2_SQ8, SQR2_SQ7
]));
static_assertions::const_assert!(masks_disjoint(&[
    SQR3_SQ6, SQR3_SQ5, SQR3_SQ4, SQR3_SQ3, SQR3_SQ2, SQR3_SQ1
]));
static_assertions::const_assert!(masks_disjoint(&[
    JSQR_JL, JSQR_JSQ4, JSQR_JSQ3, JSQR_JSQ2, JSQR_JSQ1
]));
static_assertions::const_assert!(masks_disjoint(&[DR_ADC2DATA, DR_DATA]));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_check() {
        assert!(masks_disjoint(&[]));
        assert!(masks_disjoint(&[0b01, 0b10]));
        assert!(!masks_disjoint(&[0b011, 0b110]));
    }

    #[test]
    fn sequence_slots_are_contiguous() {
        let sqr3 = [SQR3_SQ1, SQR3_SQ2, SQR3_SQ3, SQR3_SQ4, SQR3_SQ5, SQR3_SQ6];
        let sqr2 = [SQR2_SQ7, SQR2_SQ8, SQR2_SQ9, SQR2_SQ10, SQR2_SQ11, SQR2_SQ12];
        let sqr1 = [SQR1_SQ13, SQR1_SQ14, SQR1_SQ15, SQR1_SQ16];
        for reg in [&sqr3[..], &sqr2[..], &sqr1[..]] {
            for (slot, mask) in reg.iter().enumerate() {
                assert_eq!(*mask, SQ_FIELD_MASK << (slot as u32 * SQ_FIELD_WIDTH));
            }
        }
        assert_eq!(MAX_REGULAR_SEQUENCE_LEN, 16);
    }

    #[test]
    fn sample_time_fields_are_contiguous() {
        let smpr2 = [
            SMPR2_SMP0, SMPR2_SMP1, SMPR2_SMP2, SMPR2_SMP3, SMPR2_SMP4, SMPR2_SMP5, SMPR2_SMP6,
            SMPR2_SMP7, SMPR2_SMP8, SMPR2_SMP9,
        ];
        for (ch, mask) in smpr2.iter().enumerate() {
            assert_eq!(*mask, SMP_FIELD_MASK << (ch as u32 * SMP_FIELD_WIDTH));
        }
        let smpr1 = [
            SMPR1_SMP10,
            SMPR1_SMP11,
            SMPR1_SMP12,
            SMPR1_SMP13,
            SMPR1_SMP14,
            SMPR1_SMP15,
            SMPR1_SMP16,
            SMPR1_SMP17,
        ];
        for (idx, mask) in smpr1.iter().enumerate() {
            assert_eq!(*mask, SMP_FIELD_MASK << (idx as u32 * SMP_FIELD_WIDTH));
        }
    }

    #[test]
    fn sequence_length_field_holds_sixteen_entries() {
        assert_eq!(SQR1_L >> SQR1_L_SHIFT, (MAX_REGULAR_SEQUENCE_LEN - 1) as u32);
    }
}
