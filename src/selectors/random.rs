//! Uniform random path selection.

use crate::pptc::Pptc;
use crate::rng::Rng;

/// For each traffic class with `n` candidate paths: if `n > k`, pick `k` distinct indices
/// uniformly at random without replacement and mask the rest; otherwise clear the mask (all
/// paths participate).
pub fn choose_rand(pptc: &mut Pptc, k: usize, rng: &mut Rng) {
    for tc in pptc.tcs().collect::<Vec<_>>() {
        let n = pptc.num_paths(tc, true);
        if n > k {
            let chosen = rng.choose(n, k);
            let mut mask = vec![true; n];
            for i in chosen {
                mask[i] = false;
            }
            let _ = pptc.mask(tc, mask);
        } else {
            pptc.unmask(tc);
        }
    }
}
