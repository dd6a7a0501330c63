//! Fuzz target for the artifact decoder.
//!
//! `Artifact::from_bytes` reads files that may be truncated, corrupted or
//! hand-crafted. Any input must yield `Ok` or `Err`, never a panic, and a
//! decoded artifact must satisfy the dictionary/column invariants.

#![no_main]

use dictcol_core::Artifact;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(artifact) = Artifact::from_bytes(data) {
        assert!(artifact.validate().is_ok());

        // Whatever decodes must re-encode to an equivalent artifact
        let bytes = artifact.to_bytes().expect("re-encode");
        let again = Artifact::from_bytes(&bytes).expect("decode re-encoded artifact");
        assert_eq!(again, artifact);
    }
});
