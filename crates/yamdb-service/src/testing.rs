//! In-memory repositories for service unit tests

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use yamdb_common::auth::{ConfirmationCodes, JwtService};
use yamdb_common::MemoryMailer;
use yamdb_core::entities::{
    Author, Category, Comment, Genre, NewCategory, NewComment, NewGenre, NewReview, NewTitle,
    NewUser, Publication, Review, Role, Title, TitleChanges, TitleDetails, User,
};
use yamdb_core::traits::{
    CategoryRepository, CommentRepository, GenreRepository, Page, PageRequest, RepoResult,
    ReviewRepository, TitleFilter, TitleRepository, UserRepository,
};
use yamdb_core::DomainError;

use crate::services::{ServiceContext, ServiceContextBuilder};

pub(crate) fn sample_user(id: i64, role: Role) -> User {
    User {
        id,
        username: format!("user{id}"),
        email: format!("user{id}@example.com"),
        first_name: String::new(),
        last_name: String::new(),
        bio: None,
        role,
        is_superuser: false,
        last_login: None,
        date_joined: Utc::now(),
    }
}

#[derive(Default)]
struct State {
    next_id: i64,
    clock: i64,
    users: Vec<User>,
    categories: Vec<Category>,
    genres: Vec<Genre>,
    titles: Vec<Title>,
    title_genres: Vec<(i64, i64)>,
    reviews: Vec<Review>,
    comments: Vec<Comment>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Strictly increasing timestamps so ordering by date is stable
    fn now(&mut self) -> DateTime<Utc> {
        self.clock += 1;
        DateTime::<Utc>::UNIX_EPOCH + Duration::days(20_000) + Duration::seconds(self.clock)
    }

    fn author(&self, id: i64) -> RepoResult<Author> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .map(|u| Author {
                id: u.id,
                username: u.username.clone(),
            })
            .ok_or_else(|| DomainError::ValidationError(format!("unknown author {id}")))
    }

    fn details(&self, title: &Title) -> TitleDetails {
        let scores: Vec<i64> = self
            .reviews
            .iter()
            .filter(|r| r.title_id == title.id)
            .map(|r| i64::from(r.score))
            .collect();
        let rating = if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<i64>().div_euclid(scores.len() as i64) as i32)
        };
        TitleDetails {
            title: title.clone(),
            category: title
                .category_id
                .and_then(|id| self.categories.iter().find(|c| c.id == id).cloned()),
            genres: self
                .title_genres
                .iter()
                .filter(|(t, _)| *t == title.id)
                .filter_map(|(_, g)| self.genres.iter().find(|genre| genre.id == *g).cloned())
                .collect(),
            rating,
        }
    }

    fn delete_reviews(&mut self, review_ids: &[i64]) {
        self.comments.retain(|c| !review_ids.contains(&c.review_id));
        self.reviews.retain(|r| !review_ids.contains(&r.id));
    }
}

fn contains(haystack: &str, needle: Option<&str>) -> bool {
    needle.map_or(true, |n| haystack.to_lowercase().contains(&n.to_lowercase()))
}

fn paginate<T>(items: Vec<T>, page: PageRequest) -> Page<T> {
    let total = items.len() as i64;
    let items = items
        .into_iter()
        .skip(page.offset as usize)
        .take(page.limit as usize)
        .collect();
    Page { items, total }
}

/// Every repository trait over one shared in-memory state
#[derive(Default)]
pub(crate) struct MemoryStore {
    state: Mutex<State>,
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        Ok(self.state.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self
            .state
            .lock()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> RepoResult<Vec<User>> {
        Ok(self
            .state
            .lock()
            .users
            .iter()
            .filter(|u| u.username == username || u.email == email)
            .cloned()
            .collect())
    }

    async fn list(&self, search: Option<&str>, page: PageRequest) -> RepoResult<Page<User>> {
        let users = self
            .state
            .lock()
            .users
            .iter()
            .filter(|u| contains(&u.username, search))
            .cloned()
            .collect();
        Ok(paginate(users, page))
    }

    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        let mut state = self.state.lock();
        if state.users.iter().any(|u| u.username == user.username) {
            return Err(DomainError::UsernameAlreadyExists);
        }
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        let created = User {
            id: state.next_id(),
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            bio: user.bio.clone(),
            role: user.role,
            is_superuser: user.is_superuser,
            last_login: None,
            date_joined: Utc::now(),
        };
        state.users.push(created.clone());
        Ok(created)
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut state = self.state.lock();
        let others = state.users.iter().filter(|u| u.id != user.id);
        for other in others {
            if other.username == user.username {
                return Err(DomainError::UsernameAlreadyExists);
            }
            if other.email == user.email {
                return Err(DomainError::EmailAlreadyExists);
            }
        }
        let stored = state
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| DomainError::UserNotFound(user.username.clone()))?;
        *stored = user.clone();
        Ok(())
    }

    async fn delete(&self, username: &str) -> RepoResult<()> {
        let mut state = self.state.lock();
        let before = state.users.len();
        state.users.retain(|u| u.username != username);
        if state.users.len() == before {
            return Err(DomainError::UserNotFound(username.to_string()));
        }
        Ok(())
    }

    async fn touch_last_login(&self, id: i64, at: DateTime<Utc>) -> RepoResult<()> {
        if let Some(user) = self.state.lock().users.iter_mut().find(|u| u.id == id) {
            user.last_login = Some(at);
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn list(&self, search: Option<&str>, page: PageRequest) -> RepoResult<Page<Category>> {
        let mut rows: Vec<Category> = self
            .state
            .lock()
            .categories
            .iter()
            .filter(|c| contains(&c.name, search))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(paginate(rows, page))
    }

    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Category>> {
        Ok(self
            .state
            .lock()
            .categories
            .iter()
            .find(|c| c.slug == slug)
            .cloned())
    }

    async fn create(&self, category: &NewCategory) -> RepoResult<Category> {
        let mut state = self.state.lock();
        if state.categories.iter().any(|c| c.slug == category.slug) {
            return Err(DomainError::SlugAlreadyExists(category.slug.clone()));
        }
        let created = Category {
            id: state.next_id(),
            name: category.name.clone(),
            slug: category.slug.clone(),
        };
        state.categories.push(created.clone());
        Ok(created)
    }

    async fn delete(&self, slug: &str) -> RepoResult<()> {
        let mut state = self.state.lock();
        let id = state
            .categories
            .iter()
            .find(|c| c.slug == slug)
            .map(|c| c.id)
            .ok_or_else(|| DomainError::CategoryNotFound(slug.to_string()))?;
        state.categories.retain(|c| c.id != id);
        for title in state.titles.iter_mut().filter(|t| t.category_id == Some(id)) {
            title.category_id = None;
        }
        Ok(())
    }
}

#[async_trait]
impl GenreRepository for MemoryStore {
    async fn list(&self, search: Option<&str>, page: PageRequest) -> RepoResult<Page<Genre>> {
        let mut rows: Vec<Genre> = self
            .state
            .lock()
            .genres
            .iter()
            .filter(|g| contains(&g.name, search))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(paginate(rows, page))
    }

    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Genre>> {
        Ok(self.state.lock().genres.iter().find(|g| g.slug == slug).cloned())
    }

    async fn find_by_slugs(&self, slugs: &[String]) -> RepoResult<Vec<Genre>> {
        Ok(self
            .state
            .lock()
            .genres
            .iter()
            .filter(|g| slugs.contains(&g.slug))
            .cloned()
            .collect())
    }

    async fn create(&self, genre: &NewGenre) -> RepoResult<Genre> {
        let mut state = self.state.lock();
        if state.genres.iter().any(|g| g.slug == genre.slug) {
            return Err(DomainError::SlugAlreadyExists(genre.slug.clone()));
        }
        let created = Genre {
            id: state.next_id(),
            name: genre.name.clone(),
            slug: genre.slug.clone(),
        };
        state.genres.push(created.clone());
        Ok(created)
    }

    async fn delete(&self, slug: &str) -> RepoResult<()> {
        let mut state = self.state.lock();
        let id = state
            .genres
            .iter()
            .find(|g| g.slug == slug)
            .map(|g| g.id)
            .ok_or_else(|| DomainError::GenreNotFound(slug.to_string()))?;
        state.genres.retain(|g| g.id != id);
        state.title_genres.retain(|(_, g)| *g != id);
        Ok(())
    }
}

#[async_trait]
impl TitleRepository for MemoryStore {
    async fn list(
        &self,
        filter: &TitleFilter,
        page: PageRequest,
    ) -> RepoResult<Page<TitleDetails>> {
        let state = self.state.lock();
        let rows = state
            .titles
            .iter()
            .map(|t| state.details(t))
            .filter(|d| {
                filter.category.as_ref().map_or(true, |slug| {
                    d.category.as_ref().is_some_and(|c| c.slug == *slug)
                }) && filter
                    .genre
                    .as_ref()
                    .map_or(true, |slug| d.genres.iter().any(|g| g.slug == *slug))
                    && contains(&d.title.name, filter.name.as_deref())
                    && filter.year.map_or(true, |y| d.title.year == y)
            })
            .collect();
        Ok(paginate(rows, page))
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<TitleDetails>> {
        let state = self.state.lock();
        Ok(state.titles.iter().find(|t| t.id == id).map(|t| state.details(t)))
    }

    async fn exists(&self, id: i64) -> RepoResult<bool> {
        Ok(self.state.lock().titles.iter().any(|t| t.id == id))
    }

    async fn create(&self, title: &NewTitle) -> RepoResult<i64> {
        let mut state = self.state.lock();
        let id = state.next_id();
        state.titles.push(Title {
            id,
            name: title.name.clone(),
            year: title.year,
            description: title.description.clone(),
            category_id: title.category_id,
        });
        for genre_id in &title.genre_ids {
            state.title_genres.push((id, *genre_id));
        }
        Ok(id)
    }

    async fn update(&self, id: i64, changes: &TitleChanges) -> RepoResult<()> {
        let mut state = self.state.lock();
        let title = state
            .titles
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(DomainError::TitleNotFound(id))?;
        if let Some(name) = &changes.name {
            title.name.clone_from(name);
        }
        if let Some(year) = changes.year {
            title.year = year;
        }
        if let Some(description) = &changes.description {
            title.description.clone_from(description);
        }
        if let Some(category_id) = changes.category_id {
            title.category_id = category_id;
        }
        if let Some(genre_ids) = &changes.genre_ids {
            state.title_genres.retain(|(t, _)| *t != id);
            for genre_id in genre_ids {
                state.title_genres.push((id, *genre_id));
            }
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut state = self.state.lock();
        if !state.titles.iter().any(|t| t.id == id) {
            return Err(DomainError::TitleNotFound(id));
        }
        let review_ids: Vec<i64> = state
            .reviews
            .iter()
            .filter(|r| r.title_id == id)
            .map(|r| r.id)
            .collect();
        state.delete_reviews(&review_ids);
        state.title_genres.retain(|(t, _)| *t != id);
        state.titles.retain(|t| t.id != id);
        Ok(())
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn list_by_title(&self, title_id: i64, page: PageRequest) -> RepoResult<Page<Review>> {
        let mut rows: Vec<Review> = self
            .state
            .lock()
            .reviews
            .iter()
            .filter(|r| r.title_id == title_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.publication
                .pub_date
                .cmp(&a.publication.pub_date)
                .then(b.id.cmp(&a.id))
        });
        Ok(paginate(rows, page))
    }

    async fn find_in_title(&self, title_id: i64, review_id: i64) -> RepoResult<Option<Review>> {
        Ok(self
            .state
            .lock()
            .reviews
            .iter()
            .find(|r| r.id == review_id && r.title_id == title_id)
            .cloned())
    }

    async fn exists_for_author(&self, title_id: i64, author_id: i64) -> RepoResult<bool> {
        Ok(self
            .state
            .lock()
            .reviews
            .iter()
            .any(|r| r.title_id == title_id && r.publication.author.id == author_id))
    }

    async fn create(&self, review: &NewReview) -> RepoResult<Review> {
        let mut state = self.state.lock();
        if state
            .reviews
            .iter()
            .any(|r| r.title_id == review.title_id && r.publication.author.id == review.author_id)
        {
            return Err(DomainError::DuplicateReview);
        }
        let author = state.author(review.author_id)?;
        let created = Review {
            id: state.next_id(),
            title_id: review.title_id,
            score: review.score,
            publication: Publication {
                text: review.text.clone(),
                author,
                pub_date: state.now(),
            },
        };
        state.reviews.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, text: &str, score: i16) -> RepoResult<()> {
        let mut state = self.state.lock();
        let review = state
            .reviews
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(DomainError::ReviewNotFound(id))?;
        review.publication.text = text.to_string();
        review.score = score;
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut state = self.state.lock();
        if !state.reviews.iter().any(|r| r.id == id) {
            return Err(DomainError::ReviewNotFound(id));
        }
        state.delete_reviews(&[id]);
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn list_by_review(
        &self,
        review_id: i64,
        page: PageRequest,
    ) -> RepoResult<Page<Comment>> {
        let mut rows: Vec<Comment> = self
            .state
            .lock()
            .comments
            .iter()
            .filter(|c| c.review_id == review_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.publication
                .pub_date
                .cmp(&a.publication.pub_date)
                .then(b.id.cmp(&a.id))
        });
        Ok(paginate(rows, page))
    }

    async fn find_in_review(
        &self,
        review_id: i64,
        comment_id: i64,
    ) -> RepoResult<Option<Comment>> {
        Ok(self
            .state
            .lock()
            .comments
            .iter()
            .find(|c| c.id == comment_id && c.review_id == review_id)
            .cloned())
    }

    async fn create(&self, comment: &NewComment) -> RepoResult<Comment> {
        let mut state = self.state.lock();
        let author = state.author(comment.author_id)?;
        let created = Comment {
            id: state.next_id(),
            review_id: comment.review_id,
            publication: Publication {
                text: comment.text.clone(),
                author,
                pub_date: state.now(),
            },
        };
        state.comments.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, text: &str) -> RepoResult<()> {
        let mut state = self.state.lock();
        let comment = state
            .comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(DomainError::CommentNotFound(id))?;
        comment.publication.text = text.to_string();
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut state = self.state.lock();
        let before = state.comments.len();
        state.comments.retain(|c| c.id != id);
        if state.comments.len() == before {
            return Err(DomainError::CommentNotFound(id));
        }
        Ok(())
    }
}

/// Context over a fresh store, plus handles for inspecting side effects
pub(crate) struct TestContext {
    pub ctx: ServiceContext,
    pub store: Arc<MemoryStore>,
    pub mailer: Arc<MemoryMailer>,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let mailer = Arc::new(MemoryMailer::new());
        let ctx = ServiceContextBuilder::new()
            .user_repo(store.clone())
            .category_repo(store.clone())
            .genre_repo(store.clone())
            .title_repo(store.clone())
            .review_repo(store.clone())
            .comment_repo(store.clone())
            .jwt_service(Arc::new(JwtService::new(
                "unit-test-secret-key-that-is-long-enough",
                3600,
            )))
            .confirmation_codes(Arc::new(ConfirmationCodes::new("unit-test-secret", 3600)))
            .mailer(mailer.clone())
            .build()
            .expect("all dependencies provided");
        Self { ctx, store, mailer }
    }

    /// Insert an account directly, bypassing signup
    pub async fn user(&self, username: &str, role: Role) -> User {
        let mut new = NewUser::new(username, format!("{username}@example.com"));
        new.role = role;
        UserRepository::create(self.store.as_ref(), &new)
            .await
            .expect("user created")
    }

    pub async fn category(&self, slug: &str) -> Category {
        CategoryRepository::create(
            self.store.as_ref(),
            &NewCategory {
                name: slug.to_uppercase(),
                slug: slug.to_string(),
            },
        )
        .await
        .expect("category created")
    }

    pub async fn genre(&self, slug: &str) -> Genre {
        GenreRepository::create(
            self.store.as_ref(),
            &NewGenre {
                name: slug.to_uppercase(),
                slug: slug.to_string(),
            },
        )
        .await
        .expect("genre created")
    }

    pub async fn title(&self, name: &str, year: i32) -> i64 {
        TitleRepository::create(
            self.store.as_ref(),
            &NewTitle {
                name: name.to_string(),
                year,
                description: None,
                category_id: None,
                genre_ids: vec![],
            },
        )
        .await
        .expect("title created")
    }

    pub async fn review(&self, title_id: i64, author: &User, score: i16) -> Review {
        ReviewRepository::create(
            self.store.as_ref(),
            &NewReview {
                title_id,
                author_id: author.id,
                text: format!("review by {}", author.username),
                score,
            },
        )
        .await
        .expect("review created")
    }
}
