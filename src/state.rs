use std::sync::Arc;

use crate::users::UserStore;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}

#[cfg(test)]
pub mod fake {
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    };

    use async_trait::async_trait;

    use super::AppState;
    use crate::users::{dto::UserPayload, User, UserStore};

    /// In-memory store with ids handed out like a sequence.
    #[derive(Default)]
    pub struct MemoryUserStore {
        rows: Mutex<Vec<User>>,
        next_id: Mutex<i64>,
        pub fail: AtomicBool,
    }

    impl MemoryUserStore {
        fn check(&self) -> anyhow::Result<()> {
            if self.fail.load(Ordering::SeqCst) {
                anyhow::bail!("connection refused");
            }
            Ok(())
        }
    }

    #[async_trait]
    impl UserStore for MemoryUserStore {
        async fn list(&self) -> anyhow::Result<Vec<User>> {
            self.check()?;
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn create(&self, user: &UserPayload) -> anyhow::Result<i64> {
            self.check()?;
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            self.rows.lock().unwrap().push(User {
                id: *next,
                name: user.name.clone(),
                department: user.department.clone(),
                email: user.email.clone(),
            });
            Ok(*next)
        }

        async fn update(&self, id: i64, user: &UserPayload) -> anyhow::Result<()> {
            self.check()?;
            for row in self.rows.lock().unwrap().iter_mut().filter(|r| r.id == id) {
                row.name = user.name.clone();
                row.department = user.department.clone();
                row.email = user.email.clone();
            }
            Ok(())
        }

        async fn delete(&self, id: i64) -> anyhow::Result<()> {
            self.check()?;
            self.rows.lock().unwrap().retain(|r| r.id != id);
            Ok(())
        }
    }

    impl AppState {
        pub fn fake() -> (Self, Arc<MemoryUserStore>) {
            let store = Arc::new(MemoryUserStore::default());
            (Self::new(store.clone()), store)
        }
    }
}
