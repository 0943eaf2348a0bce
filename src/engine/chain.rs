//! Compiles a structure's declared field sizes into per-field offset chains
//!. Each field's chain is the minimal recipe for computing its
//! absolute offset: a run of declaration-time-known bytes, interleaved with
//! references to the runtime size of any dynamic field that precedes it.
use crate::codec::FieldSize;
use crate::engine::FieldId;

/// One term in a field's offset chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainStep {
    /// A byte count known at declaration time.
    Static(u64),
    /// The runtime size of an earlier dynamic field, resolved through
    /// [`crate::engine::State`].
    FieldSize(FieldId),
}

pub type Chain = Vec<ChainStep>;

/// Walk the fields in declaration order, producing one chain per field.
///
/// A running `current_static` byte count accumulates consecutive
/// static-sized fields; it is flushed into the shared `structure_chain`
/// prefix the moment a dynamic field is seen, so later fields reference
/// the dynamic field's *runtime* size rather than re-deriving it.
pub fn compile_chains(sizes: &[FieldSize]) -> Vec<Chain> {
    let mut chains = Vec::with_capacity(sizes.len());
    let mut structure_chain: Chain = Vec::new();
    let mut current_static: u64 = 0;

    for (index, size) in sizes.iter().enumerate() {
        let mut chain = structure_chain.clone();
        if current_static > 0 {
            chain.push(ChainStep::Static(current_static));
        }
        chains.push(chain);

        match size {
            FieldSize::Static(n) => current_static += n,
            FieldSize::Dynamic => {
                if current_static > 0 {
                    structure_chain.push(ChainStep::Static(current_static));
                    current_static = 0;
                }
                structure_chain.push(ChainStep::FieldSize(FieldId(index as u32)));
            }
        }
    }

    chains
}

#[cfg(test)]
#[path = "chain_tests.rs"]
mod tests;
