use super::*;

#[test]
fn root_is_main_function() {
    let builder = BlockBuilder::new();
    assert_eq!(builder.current(), BlockId::ROOT);
    assert_eq!(builder.tree().kind(BlockId::ROOT), Some(BlockKind::Function));
    assert!(!builder.in_function());
    assert!(!builder.in_loop());
}

#[test]
fn with_block_restores_parent() {
    let mut builder = BlockBuilder::new();
    let inner = builder.with_block(BlockKind::Loop, |b, id| {
        assert_eq!(b.current(), id);
        assert!(b.in_loop());
        id
    });
    assert_eq!(builder.current(), BlockId::ROOT);
    let tree = builder.finish();
    assert_eq!(tree.parent(inner), Some(BlockId::ROOT));
    assert_eq!(tree.len(), 2);
}

#[test]
fn loops_seen_through_plain_and_try() {
    let mut builder = BlockBuilder::new();
    builder.with_block(BlockKind::Loop, |b, _| {
        b.with_block(BlockKind::Try, |b, _| {
            b.with_block(BlockKind::Plain, |b, _| assert!(b.in_loop()));
        });
    });
}

#[test]
fn function_boundary_hides_loops() {
    let mut builder = BlockBuilder::new();
    builder.with_block(BlockKind::Loop, |b, _| {
        b.with_block(BlockKind::Function, |b, _| {
            assert!(!b.in_loop());
            assert!(b.in_function());
            b.with_block(BlockKind::Loop, |b, _| assert!(b.in_loop()));
        });
    });
}

#[test]
fn enclosing_function_and_ancestors() {
    let mut builder = BlockBuilder::new();
    let (func, plain) = builder.with_block(BlockKind::Function, |b, func| {
        let plain = b.with_block(BlockKind::Plain, |_, id| id);
        (func, plain)
    });
    let tree = builder.finish();
    assert_eq!(tree.enclosing_function(plain), func);
    assert_eq!(
        tree.ancestors(plain).collect::<Vec<_>>(),
        vec![plain, func, BlockId::ROOT]
    );
}
