#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use actix_web::cookie::Cookie;
use actix_web::web::Data;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use microblog_server::application::auth_service::AuthService;
use microblog_server::application::post_service::PostService;
use microblog_server::data::group_repository::GroupRepository;
use microblog_server::data::post_repository::PostRepository;
use microblog_server::data::user_repository::UserRepository;
use microblog_server::domain::error::DomainError;
use microblog_server::domain::group::Group;
use microblog_server::domain::post::{NewPost, Post, PostChanges};
use microblog_server::domain::user::User;
use microblog_server::infrastructure::security::{SessionKeys, hash_password};
use microblog_server::presentation::middleware::SESSION_COOKIE;

/// In-memory stand-in for the Postgres repositories, implementing the
/// same traits the real router is wired against.
pub struct TestStore {
    users: Mutex<Vec<User>>,
    groups: Mutex<Vec<Group>>,
    posts: Mutex<Vec<Post>>,
    next_post_id: AtomicI64,
}

impl TestStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            users: Mutex::new(Vec::new()),
            groups: Mutex::new(Vec::new()),
            posts: Mutex::new(Vec::new()),
            next_post_id: AtomicI64::new(1),
        })
    }

    pub fn add_user(&self, username: &str) -> User {
        let user = User::new(
            username.to_string(),
            format!("{username}@example.com"),
            "unused-hash".to_string(),
        );
        self.users.lock().unwrap().push(user.clone());
        user
    }

    pub fn add_user_with_password(&self, username: &str, password: &str) -> User {
        let user = User::new(
            username.to_string(),
            format!("{username}@example.com"),
            hash_password(password).unwrap(),
        );
        self.users.lock().unwrap().push(user.clone());
        user
    }

    pub fn add_group(&self, title: &str, slug: &str) -> Group {
        let mut groups = self.groups.lock().unwrap();
        let group = Group {
            id: groups.len() as i64 + 1,
            title: title.to_string(),
            slug: slug.to_string(),
            description: format!("Description of {title}"),
        };
        groups.push(group.clone());
        group
    }

    pub fn seed_post(&self, author: &User, text: &str, group: Option<&Group>) -> Post {
        let post = Post {
            id: self.next_post_id.fetch_add(1, Ordering::SeqCst),
            text: text.to_string(),
            pub_date: Utc::now(),
            author_id: author.id,
            author_username: author.username.clone(),
            group_id: group.map(|g| g.id),
            group_title: group.map(|g| g.title.clone()),
            group_slug: group.map(|g| g.slug.clone()),
        };
        self.posts.lock().unwrap().push(post.clone());
        post
    }

    /// Snapshot of a stored post, for asserting on mutations.
    pub fn post(&self, id: i64) -> Option<Post> {
        self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned()
    }

    pub fn post_count(&self) -> usize {
        self.posts.lock().unwrap().len()
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn group_refs(&self, group_id: Option<i64>) -> (Option<String>, Option<String>) {
        match group_id {
            Some(id) => {
                let groups = self.groups.lock().unwrap();
                match groups.iter().find(|g| g.id == id) {
                    Some(g) => (Some(g.title.clone()), Some(g.slug.clone())),
                    None => (None, None),
                }
            }
            None => (None, None),
        }
    }
}

fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));
    posts
}

#[async_trait]
impl PostRepository for TestStore {
    async fn create(&self, new: NewPost) -> Result<Post, DomainError> {
        let author_username = self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == new.author_id)
            .map(|u| u.username.clone())
            .ok_or_else(|| DomainError::Internal("unknown author".to_string()))?;
        let (group_title, group_slug) = self.group_refs(new.group_id);

        let post = Post {
            id: self.next_post_id.fetch_add(1, Ordering::SeqCst),
            text: new.text,
            pub_date: Utc::now(),
            author_id: new.author_id,
            author_username,
            group_id: new.group_id,
            group_title,
            group_slug,
        };
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError> {
        Ok(self.post(id))
    }

    async fn update(&self, id: i64, changes: PostChanges) -> Result<Option<Post>, DomainError> {
        let (group_title, group_slug) = self.group_refs(changes.group_id);
        let mut posts = self.posts.lock().unwrap();
        match posts.iter_mut().find(|p| p.id == id) {
            Some(post) => {
                post.text = changes.text;
                post.group_id = changes.group_id;
                post.group_title = group_title;
                post.group_slug = group_slug;
                Ok(Some(post.clone()))
            }
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<Post>, DomainError> {
        Ok(newest_first(self.posts.lock().unwrap().clone()))
    }

    async fn list_by_group(&self, group_id: i64) -> Result<Vec<Post>, DomainError> {
        let posts = self.posts.lock().unwrap();
        Ok(newest_first(
            posts
                .iter()
                .filter(|p| p.group_id == Some(group_id))
                .cloned()
                .collect(),
        ))
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, DomainError> {
        let posts = self.posts.lock().unwrap();
        Ok(newest_first(
            posts
                .iter()
                .filter(|p| p.author_id == author_id)
                .cloned()
                .collect(),
        ))
    }
}

#[async_trait]
impl GroupRepository for TestStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, DomainError> {
        Ok(self
            .groups
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.slug == slug)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Group>, DomainError> {
        Ok(self
            .groups
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Group>, DomainError> {
        let mut groups = self.groups.lock().unwrap().clone();
        groups.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(groups)
    }
}

#[async_trait]
impl UserRepository for TestStore {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == user.username) {
            return Err(DomainError::UserAlreadyExists(
                "username already taken".to_string(),
            ));
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::UserAlreadyExists(
                "email already registered".to_string(),
            ));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }
}

pub struct TestContext {
    pub store: Arc<TestStore>,
    pub post_service: Data<PostService>,
    pub auth_service: Data<AuthService>,
    pub keys: SessionKeys,
}

pub fn context() -> TestContext {
    let store = TestStore::new();
    let keys = SessionKeys::new("test-session-secret".to_string());

    let posts: Arc<dyn PostRepository> = store.clone();
    let groups: Arc<dyn GroupRepository> = store.clone();
    let users: Arc<dyn UserRepository> = store.clone();

    let post_service = Data::new(PostService::new(posts, groups, Arc::clone(&users)));
    let auth_service = Data::new(AuthService::new(users, keys.clone()));

    TestContext {
        store,
        post_service,
        auth_service,
        keys,
    }
}

/// A valid session cookie for `user`, as the login handler would set it.
pub fn session_cookie(ctx: &TestContext, user: &User) -> Cookie<'static> {
    let token = ctx.keys.issue(user.id).expect("issue session token");
    Cookie::new(SESSION_COOKIE, token)
}
