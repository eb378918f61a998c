//! Bleached code compares equal when only branch targets moved.

use bleach::{Bleach, BleachKind, CodeBleach, bleach_all};
use proptest::prelude::*;
use rolling::Endian;
use test_support::random_bytes;

fn arm_code(offsets: &[u32], filler: &[u8]) -> Vec<u8> {
    let mut code = Vec::new();
    for (&offset, chunk) in offsets.iter().zip(filler.chunks(12)) {
        code.extend_from_slice(&(0xeb00_0000 | (offset & 0x00ff_ffff)).to_le_bytes());
        code.extend_from_slice(chunk);
    }
    code
}

#[test]
fn moved_call_targets_vanish() {
    // Filler without 0xeb bytes so no filler word looks like a branch.
    let filler: Vec<u8> = random_bytes(3, 12 * 32)
        .into_iter()
        .map(|b| if b == 0xeb { 0 } else { b })
        .collect();
    let before: Vec<u32> = (0..32).map(|i| 0x100 + i * 7).collect();
    let after: Vec<u32> = before.iter().map(|o| o.wrapping_sub(4)).collect();

    let mut original = arm_code(&before, &filler);
    let mut modified = arm_code(&after, &filler);
    assert_ne!(original, modified);

    bleach_all(&[BleachKind::ArmBl], &mut original, Endian::Little);
    bleach_all(&[BleachKind::ArmBl], &mut modified, Endian::Little);
    assert_eq!(original, modified);
}

proptest! {
    #[test]
    fn arm_bleach_touches_only_branches(words in prop::collection::vec(any::<u32>(), 0..64)) {
        let mut bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        CodeBleach::arm_bl().bleach(&mut bytes, Endian::Little);
        for (word, chunk) in words.iter().zip(bytes.chunks_exact(4)) {
            let out = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            if word & 0xff00_0000 == 0xeb00_0000 {
                prop_assert_eq!(out, 0xeb00_0000);
            } else {
                prop_assert_eq!(out, *word);
            }
        }
    }

    #[test]
    fn clear_zeroes_everything(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
        let mut bytes = bytes;
        bleach_all(&[BleachKind::Clear], &mut bytes, Endian::Big);
        prop_assert!(bytes.iter().all(|&b| b == 0));
    }
}
