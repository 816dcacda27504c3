//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `rollcall_core` linkage.
//! - Run one scripted submission against the demo timetable.

use rollcall_core::{
    demo_catalog, AttendanceService, InMemoryRecordStore, StaticLocationSource, SystemClock,
};

fn main() {
    println!("rollcall_core ping={}", rollcall_core::ping());
    println!("rollcall_core version={}", rollcall_core::core_version());

    let catalog = demo_catalog();
    for class in catalog.classes() {
        println!(
            "class id={} name={:?} window={} lecturer={:?}",
            class.id, class.name, class.window, class.lecturer
        );
    }

    // Scripted submission from the first class's own anchor, so the fence
    // check always passes; only the timing status depends on the wall clock.
    let anchor = catalog.classes()[0].anchor;
    let service = AttendanceService::new(
        catalog,
        InMemoryRecordStore::new(),
        SystemClock,
        StaticLocationSource(anchor),
    );

    match service.submit_attendance("1", "cli-demo-user") {
        Ok(record) => println!(
            "submitted id={} status={} at={}",
            record.id,
            record.status.as_str(),
            record.timestamp
        ),
        Err(err) => println!("submission rejected: {err}"),
    }
}
