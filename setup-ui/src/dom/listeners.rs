// Event listener bookkeeping for a mounted page

/// Listeners registered by the current mount. Remounting detaches the previous set first, so
/// every change event reaches exactly one controller.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) struct ListenerSet<L> {
    active: Vec<L>,
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
impl<L> ListenerSet<L> {
    pub(crate) const fn new() -> Self {
        Self { active: Vec::new() }
    }

    pub(crate) fn push(&mut self, listener: L) {
        self.active.push(listener);
    }

    /// Hand every registered listener to `detach` and forget it. Returns how many were removed.
    pub(crate) fn detach_all<F: FnMut(L)>(&mut self, detach: F) -> usize {
        let count = self.active.len();
        self.active.drain(..).for_each(detach);
        count
    }

    pub(crate) fn len(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remount_detaches_previous_listeners_once() {
        let mut set = ListenerSet::new();
        set.push("useSSL:change");
        set.push("useCaptch:change");
        set.push("window:load");

        let mut detached = Vec::new();
        assert_eq!(set.detach_all(|l| detached.push(l)), 3);
        assert_eq!(detached, vec!["useSSL:change", "useCaptch:change", "window:load"]);
        assert_eq!(set.len(), 0);

        set.push("dbType:change");
        assert_eq!(set.len(), 1);
        assert_eq!(set.detach_all(|_| {}), 1);
        assert_eq!(set.detach_all(|_| panic!("already detached")), 0);
    }
}
