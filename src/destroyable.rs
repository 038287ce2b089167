// implemented by owners of timers and subscriptions that outlive them unless torn down explicitly
pub trait Destroyable {
    fn destroy(&mut self);
}
