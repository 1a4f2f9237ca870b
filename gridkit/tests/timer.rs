use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use gridkit::{Scheduler, Timer};

fn later(ms: u64) -> Instant {
    Instant::now() + Duration::from_millis(ms)
}

// ============================================================================
// Scheduler Tests
// ============================================================================

#[test]
fn test_run_due_fires_in_deadline_order() {
    let scheduler = Scheduler::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    let base = Instant::now();
    for (name, ms) in [("late", 30), ("early", 10), ("middle", 20)] {
        let order = Rc::clone(&order);
        scheduler.after_at(base + Duration::from_millis(ms), move || order.borrow_mut().push(name));
    }

    let ran = scheduler.run_due(base + Duration::from_millis(25));

    assert_eq!(ran, 2);
    assert_eq!(*order.borrow(), vec!["early", "middle"]);
    assert_eq!(scheduler.len(), 1);
    assert_eq!(scheduler.next_deadline(), Some(base + Duration::from_millis(30)));
}

#[test]
fn test_cancel_drops_callback() {
    let scheduler = Scheduler::new();
    let fired = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&fired);
    let id = scheduler.after(Duration::from_millis(5), move || *flag.borrow_mut() = true);

    assert!(scheduler.is_pending(id));
    assert!(scheduler.cancel(id));
    assert!(!scheduler.cancel(id));
    scheduler.run_due(later(100));

    assert!(!*fired.borrow());
    assert!(scheduler.is_empty());
}

#[test]
fn test_callbacks_scheduled_while_running_wait() {
    let scheduler = Scheduler::new();
    let count = Rc::new(RefCell::new(0));
    let inner_scheduler = scheduler.clone();
    let inner_count = Rc::clone(&count);
    scheduler.after(Duration::ZERO, move || {
        *inner_count.borrow_mut() += 1;
        let again = Rc::clone(&inner_count);
        inner_scheduler.after(Duration::ZERO, move || *again.borrow_mut() += 1);
    });

    scheduler.run_due(later(1));
    assert_eq!(*count.borrow(), 1);

    scheduler.run_due(later(1));
    assert_eq!(*count.borrow(), 2);
}

// ============================================================================
// Timer Tests
// ============================================================================

#[test]
fn test_schedule_once_absorbs_while_pending() {
    let scheduler = Scheduler::new();
    let timer = Timer::new(scheduler.clone());
    let fired = Rc::new(RefCell::new(Vec::new()));

    for n in 0..3 {
        let fired = Rc::clone(&fired);
        let scheduled = timer.schedule_once(Duration::from_millis(50), move || fired.borrow_mut().push(n));
        assert_eq!(scheduled, n == 0);
    }
    assert!(timer.is_pending());

    scheduler.run_due(later(100));

    assert_eq!(*fired.borrow(), vec![0]);
    assert!(!timer.is_pending());
}

#[test]
fn test_timer_rearms_after_firing() {
    let scheduler = Scheduler::new();
    let timer = Timer::new(scheduler.clone());

    assert!(timer.schedule_once(Duration::ZERO, || {}));
    scheduler.run_due(later(1));

    assert!(timer.schedule_once(Duration::ZERO, || {}));
}

#[test]
fn test_timer_cancel() {
    let scheduler = Scheduler::new();
    let timer = Timer::new(scheduler.clone());
    timer.schedule_once(Duration::from_secs(1), || {});

    assert!(timer.cancel());
    assert!(!timer.is_pending());
    assert!(scheduler.is_empty());
    assert!(!timer.cancel());
}
