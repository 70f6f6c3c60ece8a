//! Client-side route table
//!
//! Routes are plain data: a path, the view it shows and page metadata. The
//! [`Router`] resolves a path against the table and, once a navigation has
//! completed, runs its after-navigation hooks. The built-in hook keeps the
//! page title in sync with the matched route.
//!
//! No route carries an authentication guard. A caller that wants one checks
//! the session before calling [`Router::navigate`].

use crate::APP_NAME;
use thiserror::Error;

/// Title used when the matched route has no metadata
pub const DEFAULT_TITLE: &str = "管理后台";

const MAX_REDIRECTS: usize = 8;

/// Views a route can show, produced on demand by whoever renders them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Login,
    LotteryJoin,
    Layout,
    Dashboard,
    Birthday,
    Messages,
    Config,
}

/// Page metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMeta {
    pub title: &'static str,
    pub icon: Option<&'static str>,
}

/// One entry of the route table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// Absolute for top-level routes, relative to the parent for children
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub view: View,
    pub meta: Option<RouteMeta>,
    pub redirect: Option<&'static str>,
    pub children: Vec<RouteDescriptor>,
}

impl RouteDescriptor {
    const fn leaf(
        path: &'static str,
        name: &'static str,
        view: View,
        title: &'static str,
        icon: Option<&'static str>,
    ) -> Self {
        Self {
            path,
            name: Some(name),
            view,
            meta: Some(RouteMeta { title, icon }),
            redirect: None,
            children: Vec::new(),
        }
    }
}

/// Route table errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("Invalid route table: {0}")]
    InvalidTable(String),
}

/// One level of a resolved navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRoute {
    /// Full path of this level
    pub path: String,
    pub name: Option<&'static str>,
    pub view: View,
    pub meta: Option<RouteMeta>,
}

/// Outcome of resolving a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// Final path after redirects
    pub path: String,
    /// Path originally requested, set when a redirect was followed
    pub redirected_from: Option<String>,
    /// Parent first, leaf last; empty for an unknown path
    pub matched: Vec<MatchedRoute>,
}

impl ResolvedRoute {
    /// Deepest matched level
    pub fn leaf(&self) -> Option<&MatchedRoute> {
        self.matched.last()
    }

    /// Metadata of the deepest level that has any
    pub fn meta(&self) -> Option<RouteMeta> {
        self.matched.iter().rev().find_map(|m| m.meta)
    }

    /// Route name of the leaf
    pub fn name(&self) -> Option<&'static str> {
        self.leaf().and_then(|m| m.name)
    }

    pub fn is_matched(&self) -> bool {
        !self.matched.is_empty()
    }

    /// Page title shown after navigating here
    pub fn page_title(&self) -> String {
        let title = self.meta().map_or(DEFAULT_TITLE, |meta| meta.title);
        format!("{title} - {APP_NAME}")
    }
}

/// Static route table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    pub const fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }

    /// The console's routes
    pub fn standard() -> Self {
        Self::new(vec![
            RouteDescriptor::leaf("/login", "Login", View::Login, "登录", None),
            RouteDescriptor::leaf(
                "/lottery/join",
                "LotteryJoin",
                View::LotteryJoin,
                "抽奖报名",
                None,
            ),
            RouteDescriptor {
                path: "/",
                name: None,
                view: View::Layout,
                meta: None,
                redirect: Some("/dashboard"),
                children: vec![
                    RouteDescriptor::leaf(
                        "dashboard",
                        "Dashboard",
                        View::Dashboard,
                        "首页",
                        Some("Odometer"),
                    ),
                    RouteDescriptor::leaf(
                        "birthday",
                        "Birthday",
                        View::Birthday,
                        "生日管理",
                        Some("Calendar"),
                    ),
                    RouteDescriptor::leaf(
                        "messages",
                        "Messages",
                        View::Messages,
                        "消息管理",
                        Some("ChatDotRound"),
                    ),
                    RouteDescriptor::leaf(
                        "config",
                        "Config",
                        View::Config,
                        "系统配置",
                        Some("Setting"),
                    ),
                ],
            },
        ])
    }

    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Check the table's structural invariants
    ///
    /// Exactly one top-level route redirects, from `/` to a path that
    /// resolves, and every route with children shows the shared layout view.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidTable`] describing the first violation
    pub fn validate(&self) -> Result<(), RouteError> {
        let redirects: Vec<_> = self
            .routes
            .iter()
            .filter(|r| r.redirect.is_some())
            .collect();

        let [root] = redirects.as_slice() else {
            return Err(RouteError::InvalidTable(format!(
                "expected exactly one top-level redirect, found {}",
                redirects.len()
            )));
        };

        if root.path != "/" {
            return Err(RouteError::InvalidTable(format!(
                "redirect must live on '/', found on '{}'",
                root.path
            )));
        }

        if let Some(target) = root.redirect
            && self.match_path(target).is_none()
        {
            return Err(RouteError::InvalidTable(format!(
                "redirect target '{target}' does not resolve"
            )));
        }

        for route in &self.routes {
            if !route.children.is_empty() && route.view != View::Layout {
                return Err(RouteError::InvalidTable(format!(
                    "'{}' has children but does not show the layout",
                    route.path
                )));
            }
            if let Some(child) = route.children.iter().find(|c| c.redirect.is_some()) {
                return Err(RouteError::InvalidTable(format!(
                    "child route '{}' may not redirect",
                    child.path
                )));
            }
        }

        Ok(())
    }

    /// Resolve a path, following redirects
    ///
    /// Unknown paths resolve to an empty match rather than an error.
    pub fn resolve(&self, path: &str) -> ResolvedRoute {
        let requested = normalize(path);
        let mut current = requested.clone();

        for _ in 0..MAX_REDIRECTS {
            let Some((matched, redirect)) = self.match_path(&current) else {
                break;
            };

            if let Some(target) = redirect {
                current = normalize(target);
                continue;
            }

            let redirected_from = (current != requested).then(|| requested.clone());
            return ResolvedRoute {
                path: current,
                redirected_from,
                matched,
            };
        }

        ResolvedRoute {
            path: current,
            redirected_from: None,
            matched: Vec::new(),
        }
    }

    fn match_path(&self, path: &str) -> Option<(Vec<MatchedRoute>, Option<&'static str>)> {
        for route in &self.routes {
            if route.path == path {
                return Some((vec![matched(route, route.path.to_string())], route.redirect));
            }

            for child in &route.children {
                let full = join(route.path, child.path);
                if full == path {
                    return Some((
                        vec![
                            matched(route, route.path.to_string()),
                            matched(child, full),
                        ],
                        child.redirect,
                    ));
                }
            }
        }
        None
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn matched(route: &RouteDescriptor, path: String) -> MatchedRoute {
    MatchedRoute {
        path,
        name: route.name,
        view: route.view,
        meta: route.meta,
    }
}

fn join(parent: &str, child: &str) -> String {
    format!("{}/{}", parent.trim_end_matches('/'), child.trim_start_matches('/'))
}

fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Hook run after every completed navigation
pub type AfterEachHook = Box<dyn Fn(&ResolvedRoute) + Send + Sync>;

/// Navigation state over a [`RouteTable`]
pub struct Router {
    table: RouteTable,
    current: Option<ResolvedRoute>,
    title: String,
    hooks: Vec<AfterEachHook>,
}

impl Router {
    pub fn new(table: RouteTable) -> Self {
        Self {
            table,
            current: None,
            title: APP_NAME.to_string(),
            hooks: Vec::new(),
        }
    }

    /// Register a hook to run after every navigation, after the title update
    pub fn after_each(&mut self, hook: impl Fn(&ResolvedRoute) + Send + Sync + 'static) {
        self.hooks.push(Box::new(hook));
    }

    /// Navigate to `path` and run the after-navigation hooks
    pub fn navigate(&mut self, path: &str) -> &ResolvedRoute {
        let resolved = self.table.resolve(path);
        self.title = resolved.page_title();
        tracing::debug!(path = %resolved.path, title = %self.title, "Navigation complete");

        for hook in &self.hooks {
            hook(&resolved);
        }

        self.current.insert(resolved)
    }

    pub const fn current(&self) -> Option<&ResolvedRoute> {
        self.current.as_ref()
    }

    /// Currently displayed page title
    pub fn title(&self) -> &str {
        &self.title
    }

    pub const fn table(&self) -> &RouteTable {
        &self.table
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(RouteTable::standard())
    }
}
