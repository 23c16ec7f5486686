use pretty_assertions::assert_eq;

use super::*;

fn handler(name: &str) -> Arc<Closure> {
    Arc::new(Closure::native(name, false, |_| Ok(Value::Null)))
}

fn drain(irq: &mut Interrupts) -> Vec<(i64, String)> {
    let mut taken = Vec::new();
    while let Some(fired) = irq.take_next() {
        taken.push((fired.id, fired.handler.name().to_string()));
        irq.finish();
    }
    taken
}

#[test]
fn fifo_order() {
    let mut irq = Interrupts::new();
    irq.register(1, handler("one"));
    irq.register(2, handler("two"));
    irq.raise(2, Vec::new());
    irq.raise(1, Vec::new());
    irq.raise(2, Vec::new());
    assert_eq!(
        drain(&mut irq),
        vec![(2, "two".into()), (1, "one".into()), (2, "two".into())]
    );
}

#[test]
fn disabled_gate_keeps_queue() {
    let mut irq = Interrupts::new();
    irq.register(1, handler("one"));
    assert!(irq.is_enabled());
    irq.disable();
    assert!(!irq.is_enabled());
    irq.raise(1, vec![Value::Int(7)]);
    assert!(irq.take_next().is_none());
    assert_eq!(irq.pending_len(), 1);
    irq.enable();
    let fired = irq.take_next().unwrap();
    assert_eq!(fired.args, vec![Value::Int(7)]);
}

#[test]
fn one_handler_at_a_time() {
    let mut irq = Interrupts::new();
    irq.register(1, handler("one"));
    irq.raise(1, Vec::new());
    irq.raise(1, Vec::new());
    assert!(irq.take_next().is_some());
    assert!(irq.in_handler());
    assert!(irq.take_next().is_none());
    irq.finish();
    assert!(irq.take_next().is_some());
}

#[test]
fn removed_handler_is_skipped() {
    let mut irq = Interrupts::new();
    irq.register(1, handler("one"));
    irq.register(2, handler("two"));
    irq.raise(1, Vec::new());
    irq.raise(2, Vec::new());
    assert!(irq.remove(1));
    assert!(!irq.remove(1));
    assert_eq!(drain(&mut irq), vec![(2, "two".into())]);
}

#[test]
fn timers_fire_once_in_deadline_order() {
    let mut irq = Interrupts::new();
    let slow = irq.set_timeout(handler("slow"), Duration::ZERO, Duration::from_millis(50));
    let fast = irq.set_timeout(handler("fast"), Duration::ZERO, Duration::from_millis(10));
    assert_eq!((slow, fast), (-1, -2));

    irq.fire_due(Duration::from_millis(5));
    assert_eq!(irq.pending_len(), 0);

    irq.fire_due(Duration::from_millis(60));
    assert_eq!(drain(&mut irq), vec![(-2, "fast".into()), (-1, "slow".into())]);
    assert!(!irq.is_registered(-1));

    irq.fire_due(Duration::from_millis(120));
    assert_eq!(irq.pending_len(), 0);
}

#[test]
fn cleared_timer_never_fires() {
    let mut irq = Interrupts::new();
    let id = irq.set_timeout(handler("t"), Duration::ZERO, Duration::from_millis(1));
    assert!(irq.clear_timeout(id));
    assert!(!irq.clear_timeout(id));
    irq.fire_due(Duration::from_secs(1));
    assert!(irq.take_next().is_none());
}

#[test]
fn clear_timeout_ignores_interrupt_ids() {
    let mut irq = Interrupts::new();
    irq.register(3, handler("three"));
    assert!(!irq.clear_timeout(3));
    assert!(irq.is_registered(3));
}
