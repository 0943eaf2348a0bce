use super::*;

#[test]
fn all_static_fields_chain_to_flat_offsets() {
    // sizes 1, 2, 4, ... -> offsets 0, 1, 3, 7
    let sizes = [
        FieldSize::Static(1),
        FieldSize::Static(2),
        FieldSize::Static(4),
        FieldSize::Static(4),
    ];
    let chains = compile_chains(&sizes);

    fn resolve(chain: &Chain) -> u64 {
        chain
            .iter()
            .map(|step| match step {
                ChainStep::Static(n) => *n,
                ChainStep::FieldSize(_) => panic!("no dynamic fields in this test"),
            })
            .sum()
    }

    assert_eq!(resolve(&chains[0]), 0);
    assert_eq!(resolve(&chains[1]), 1);
    assert_eq!(resolve(&chains[2]), 3);
    assert_eq!(resolve(&chains[3]), 7);
}

#[test]
fn mixed_static_and_dynamic_fields_reference_prior_dynamic_sizes() {
    // a: static 2, b: dynamic, c: static 6, e: dynamic, g: static 2 (this field)
    let sizes = [
        FieldSize::Static(2),  // a -> field 0
        FieldSize::Dynamic,    // b -> field 1
        FieldSize::Static(6),  // c -> field 2
        FieldSize::Dynamic,    // e -> field 3
        FieldSize::Static(2),  // f -> field 4
        FieldSize::Static(0),  // g -> field 5 (the field under test)
    ];
    let chains = compile_chains(&sizes);

    assert_eq!(
        chains[5],
        vec![
            ChainStep::Static(2),
            ChainStep::FieldSize(FieldId(1)),
            ChainStep::Static(6),
            ChainStep::FieldSize(FieldId(3)),
            ChainStep::Static(2),
        ]
    );
}

#[test]
fn a_dynamic_field_immediately_after_another_has_no_static_step_between_them() {
    let sizes = [FieldSize::Dynamic, FieldSize::Dynamic];
    let chains = compile_chains(&sizes);
    assert_eq!(chains[0], vec![]);
    assert_eq!(chains[1], vec![ChainStep::FieldSize(FieldId(0))]);
}
