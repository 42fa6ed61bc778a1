use std::cell::RefCell;
use std::collections::HashMap;

use super::ActivePortal;
use crate::model::Route;

#[derive(Default)]
struct PortalManager {
    next_handle: u32,
    portals: HashMap<u32, ActivePortal>,
}

impl PortalManager {
    fn create_portal(&mut self, route: Route) -> u32 {
        self.next_handle = self.next_handle.saturating_add(1).max(1);
        let handle = self.next_handle;
        self.portals.insert(handle, ActivePortal::new(route));
        handle
    }

    fn destroy_portal(&mut self, handle: u32) {
        self.portals.remove(&handle);
    }
}

thread_local! {
    static MANAGER: RefCell<PortalManager> = RefCell::new(PortalManager::default());
}

pub(super) fn create_portal(route: Route) -> u32 {
    MANAGER.with(|manager| manager.borrow_mut().create_portal(route))
}

pub(super) fn destroy_portal(handle: u32) {
    MANAGER.with(|manager| manager.borrow_mut().destroy_portal(handle));
}

pub(super) fn with_portal_mut<T>(handle: u32, f: impl FnOnce(&mut ActivePortal) -> T) -> Option<T> {
    MANAGER.with(|manager| {
        let mut manager = manager.borrow_mut();
        manager.portals.get_mut(&handle).map(f)
    })
}

pub(super) fn with_portal<T>(handle: u32, f: impl FnOnce(&ActivePortal) -> T) -> Option<T> {
    MANAGER.with(|manager| {
        let manager = manager.borrow();
        manager.portals.get(&handle).map(f)
    })
}
