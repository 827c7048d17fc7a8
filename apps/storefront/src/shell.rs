//! # Shell
//!
//! Line commands in, rendered views out. The shell owns the context and
//! whichever view the session currently gates to.
//!
//! ## Command Routing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin line ──► Command::from_str ──► Shell::execute                    │
//! │                                          │                              │
//! │        ┌─────────────────┬───────────────┼──────────────┬────────────┐  │
//! │        ▼                 ▼               ▼              ▼            ▼  │
//! │   login/register     add/remove/buy   edit/set/save/  orders/books  quit│
//! │   (AuthForm)         (BuyerDashboard) cancel/delete   (current view)    │
//! │                                       (BookManager)                     │
//! │                                                                         │
//! │  Ok(text) ──► stdout          Err(UiError) ──► "! message" alert line   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write as _;
use std::str::FromStr;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::debug;

use bookmart_core::{BookId, OrderId, Role};

use crate::error::{UiError, UiResult};
use crate::render;
use crate::state::{AppContext, Screen};
use crate::views::{AuthForm, AuthMode, BookManager, BuyerDashboard, Confirm, SellerDashboard};

// =============================================================================
// Commands
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    WhoAmI,
    Quit,
    Login {
        email: String,
        password: String,
    },
    Register {
        name: String,
        email: String,
        password: String,
        role: Role,
    },
    Logout,
    Books,
    Orders,
    Cart,
    Add(BookId),
    Remove(BookId),
    Buy(BookId),
    Edit(BookId),
    Cancel,
    Set {
        field: String,
        value: String,
    },
    Save,
    Delete(BookId),
    Show(BookId),
    Order(OrderId),
    Catalog,
    Back,
    Refresh,
}

const USAGE: &str = "\
Commands:
  login <email> <password>
  register <full name> <email> <password> [buyer|seller]
  logout | whoami | help | quit
  books | orders | refresh | show <bookId> | order <orderId>
  cart | add <bookId> | remove <bookId> | buy <bookId>        (buyer)
  edit <bookId> | set <field> <value> | save | cancel        (seller, catalog)
  delete <bookId>                                            (seller, catalog)
  catalog | back                                             (all books)";

fn usage(hint: &str) -> UiError {
    UiError::validation(format!("{}\n{}", hint, USAGE))
}

/// `<full name...> <email> <password> [role]`: the name runs up to the first
/// word with an `@`.
fn register_args(args: &[&str]) -> Result<Command, UiError> {
    let at = args.iter().position(|w| w.contains('@'));
    let (name, rest) = match at {
        Some(i) if i > 0 => (args[..i].join(" "), &args[i..]),
        _ => return Err(usage("'register' needs a name, an email and a password")),
    };
    let (email, password, role) = match rest {
        [email, password] => (email, password, Role::default()),
        [email, password, role] => (email, password, role.parse::<Role>()?),
        _ => return Err(usage("'register' needs a name, an email and a password")),
    };
    Ok(Command::Register {
        name,
        email: email.to_string(),
        password: password.to_string(),
        role,
    })
}

impl FromStr for Command {
    type Err = UiError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(usage("Empty command"));
        };
        let args: Vec<&str> = words.collect();

        let book_arg = |args: &[&str]| -> Result<BookId, UiError> {
            match args {
                [id] => Ok(id.parse::<BookId>()?),
                _ => Err(usage(&format!("'{}' takes one book id", verb))),
            }
        };

        let command = match (verb.to_lowercase().as_str(), args.as_slice()) {
            ("help" | "?", _) => Command::Help,
            ("whoami", []) => Command::WhoAmI,
            ("quit" | "exit", []) => Command::Quit,
            ("login", [email, password]) => Command::Login {
                email: email.to_string(),
                password: password.to_string(),
            },
            ("register", _) => register_args(&args[..])?,
            ("logout", []) => Command::Logout,
            ("books", []) => Command::Books,
            ("orders" | "sales", []) => Command::Orders,
            ("cart", []) => Command::Cart,
            ("add", _) => Command::Add(book_arg(&args[..])?),
            ("remove", _) => Command::Remove(book_arg(&args[..])?),
            ("buy", _) => Command::Buy(book_arg(&args[..])?),
            ("edit", _) => Command::Edit(book_arg(&args[..])?),
            ("cancel", []) => Command::Cancel,
            ("set", [field, value @ ..]) if !value.is_empty() => Command::Set {
                field: field.to_lowercase(),
                value: value.join(" "),
            },
            ("save", []) => Command::Save,
            ("delete", _) => Command::Delete(book_arg(&args[..])?),
            ("show", _) => Command::Show(book_arg(&args[..])?),
            ("order", [id]) => Command::Order(id.parse::<OrderId>()?),
            ("catalog", []) => Command::Catalog,
            ("back", []) => Command::Back,
            ("refresh", []) => Command::Refresh,
            _ => return Err(usage(&format!("Unrecognized command: {}", line.trim()))),
        };
        Ok(command)
    }
}

// =============================================================================
// Shell
// =============================================================================

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

pub struct Shell {
    ctx: AppContext,
    auth: AuthForm,
    buyer: Option<BuyerDashboard>,
    seller: Option<SellerDashboard>,
    catalog: Option<BookManager>,
}

/// The manager edit commands act on: the catalog if open, else the seller's.
fn active_manager<'a>(
    catalog: &'a mut Option<BookManager>,
    seller: &'a mut Option<SellerDashboard>,
) -> Option<&'a mut BookManager> {
    match catalog {
        Some(manager) => Some(manager),
        None => seller.as_mut().map(SellerDashboard::manager_mut),
    }
}

fn hint(text: &str) -> UiResult<Outcome> {
    Ok(Outcome::Continue(text.to_string()))
}

impl Shell {
    pub fn new(ctx: AppContext) -> Self {
        Shell {
            ctx,
            auth: AuthForm::new(),
            buyer: None,
            seller: None,
            catalog: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.ctx.screen()
    }

    /// Restores a saved session and renders the first screen.
    pub async fn start(&mut self) -> String {
        if let Some(user) = self.ctx.restore() {
            debug!(user_id = %user.id, "Skipping login");
        }
        self.enter_screen().await;
        self.render()
    }

    /// Rebuilds the view for the current screen and loads its lists.
    async fn enter_screen(&mut self) {
        self.buyer = None;
        self.seller = None;
        self.catalog = None;

        let Some(user_id) = self.ctx.user().map(|u| u.id) else {
            return;
        };
        let api = self.ctx.api();
        match self.ctx.screen() {
            Screen::BuyerDashboard => {
                let mut dashboard = BuyerDashboard::new(user_id);
                dashboard.load(api).await;
                self.buyer = Some(dashboard);
            }
            Screen::SellerDashboard => {
                let mut dashboard = SellerDashboard::new(user_id);
                dashboard.load(api).await;
                self.seller = Some(dashboard);
            }
            Screen::Login => {}
        }
    }

    pub fn render(&self) -> String {
        if let Some(manager) = &self.catalog {
            return render::catalog(manager);
        }
        if let Some(dashboard) = &self.buyer {
            return render::buyer_dashboard(dashboard);
        }
        if let Some(dashboard) = &self.seller {
            return render::seller_dashboard(dashboard);
        }
        render::auth_form(&self.auth)
    }

    fn signed_in(&self) -> bool {
        self.ctx.user().is_some()
    }

    pub async fn execute(
        &mut self,
        command: Command,
        confirm: &mut dyn Confirm,
    ) -> UiResult<Outcome> {
        match command {
            Command::Help => return hint(USAGE),
            Command::Quit => return Ok(Outcome::Quit),
            Command::WhoAmI => {
                return hint(&match self.ctx.user() {
                    Some(user) => render::user(user),
                    None => "Not signed in".to_string(),
                })
            }
            Command::Login { email, password } => {
                if let Some(user) = self.ctx.user() {
                    return hint(&format!("Already signed in as {}; logout first", user.name));
                }
                self.auth.set_mode(AuthMode::Login);
                self.auth.email = email;
                self.auth.password = password;
                return self.authenticate().await;
            }
            Command::Register {
                name,
                email,
                password,
                role,
            } => {
                if let Some(user) = self.ctx.user() {
                    return hint(&format!("Already signed in as {}; logout first", user.name));
                }
                self.auth.set_mode(AuthMode::Register);
                self.auth.name = name;
                self.auth.email = email;
                self.auth.password = password;
                self.auth.role = role;
                return self.authenticate().await;
            }
            _ if !self.signed_in() => return hint("Please log in first (type 'help')"),
            Command::Logout => {
                self.ctx.logout();
                self.auth = AuthForm::new();
                self.enter_screen().await;
                return hint("Signed out");
            }
            _ => {}
        }

        debug!(?command, "Executing");
        let api = self.ctx.api();
        match command {
            Command::Books => {
                if let Some(manager) = &self.catalog {
                    return hint(&render::books("Book Management", manager.books()));
                }
                if let Some(dashboard) = &self.buyer {
                    return hint(&render::books("Available Books", dashboard.books()));
                }
                if let Some(dashboard) = &self.seller {
                    return hint(&render::books("My Books", dashboard.manager().books()));
                }
                hint("No book list on this screen")
            }
            Command::Orders => {
                if let Some(dashboard) = &self.buyer {
                    return hint(&render::orders("My Orders", dashboard.orders()));
                }
                if let Some(dashboard) = &self.seller {
                    return hint(&render::orders("My Sales", dashboard.sales()));
                }
                hint("No order list on this screen")
            }
            Command::Cart => match &self.buyer {
                Some(dashboard) => hint(&render::cart(dashboard)),
                None => hint("Only buyers have a cart"),
            },
            Command::Add(id) => match self.buyer.as_mut() {
                Some(dashboard) => {
                    let qty = dashboard.add(id)?;
                    hint(&format!("Book #{} in cart: {}", id, qty))
                }
                None => hint("Only buyers have a cart"),
            },
            Command::Remove(id) => match self.buyer.as_mut() {
                Some(dashboard) => match dashboard.remove(id)? {
                    0 => hint(&format!("Book #{} removed from cart", id)),
                    qty => hint(&format!("Book #{} in cart: {}", id, qty)),
                },
                None => hint("Only buyers have a cart"),
            },
            Command::Buy(id) => match self.buyer.as_mut() {
                Some(dashboard) => {
                    let order = dashboard.purchase(api, id).await?;
                    hint(&format!(
                        "Purchase successful! Order #{}: {} x book #{} for {}",
                        order.id, order.quantity, order.book_id, order.total_price
                    ))
                }
                None => hint("Only buyers can purchase"),
            },
            Command::Edit(id) => match active_manager(&mut self.catalog, &mut self.seller) {
                Some(manager) => {
                    manager.select(id)?;
                    hint(&render::book_form(manager))
                }
                None => hint("Nothing to edit here; try 'catalog'"),
            },
            Command::Cancel => match active_manager(&mut self.catalog, &mut self.seller) {
                Some(manager) => {
                    manager.cancel()?;
                    hint(&render::book_form(manager))
                }
                None => hint("Nothing to cancel"),
            },
            Command::Set { field, value } => {
                match active_manager(&mut self.catalog, &mut self.seller) {
                    Some(manager) => {
                        manager.set_field(&field, &value)?;
                        hint(&render::book_form(manager))
                    }
                    None => hint("No book form here; try 'catalog'"),
                }
            }
            Command::Save => match active_manager(&mut self.catalog, &mut self.seller) {
                Some(manager) => {
                    let book = manager.submit(api).await?;
                    hint(&format!("Saved book #{} ({})", book.id, book.title))
                }
                None => hint("No book form here; try 'catalog'"),
            },
            Command::Delete(id) => match active_manager(&mut self.catalog, &mut self.seller) {
                Some(manager) => {
                    if manager.delete(api, id, confirm).await? {
                        hint(&format!("Deleted book #{}", id))
                    } else {
                        hint("Delete cancelled")
                    }
                }
                None => hint("Nothing to delete here; try 'catalog'"),
            },
            Command::Show(id) => {
                let book = api
                    .get_book(id)
                    .await
                    .map_err(|e| UiError::from_client(e, "Failed to load book"))?;
                hint(&render::book_detail(&book))
            }
            Command::Order(id) => {
                let order = api
                    .get_order(id)
                    .await
                    .map_err(|e| UiError::from_client(e, "Failed to load order"))?;
                hint(&render::order_detail(&order))
            }
            Command::Catalog => {
                let mut manager = BookManager::catalog();
                manager.load(api).await;
                self.catalog = Some(manager);
                hint(&self.render())
            }
            Command::Back => {
                if self.catalog.take().is_none() {
                    return hint("Already on the dashboard");
                }
                if let Some(dashboard) = self.buyer.as_mut() {
                    dashboard.load(api).await;
                }
                if let Some(dashboard) = self.seller.as_mut() {
                    dashboard.load(api).await;
                }
                hint(&self.render())
            }
            Command::Refresh => {
                if let Some(manager) = self.catalog.as_mut() {
                    manager.load(api).await;
                } else if let Some(dashboard) = self.buyer.as_mut() {
                    dashboard.load(api).await;
                } else if let Some(dashboard) = self.seller.as_mut() {
                    dashboard.load(api).await;
                }
                hint(&self.render())
            }
            Command::Help
            | Command::Quit
            | Command::WhoAmI
            | Command::Login { .. }
            | Command::Register { .. }
            | Command::Logout => hint(USAGE),
        }
    }

    async fn authenticate(&mut self) -> UiResult<Outcome> {
        let user = self.auth.submit(&mut self.ctx).await?;
        self.enter_screen().await;
        hint(&format!("Welcome, {}!\n\n{}", user.name, self.render()))
    }

    fn prompt(&self) -> String {
        match (self.ctx.user(), self.catalog.is_some()) {
            (None, _) => "bookmart> ".to_string(),
            (Some(user), false) => format!("{}@bookmart> ", user.name),
            (Some(user), true) => format!("{}@bookmart/catalog> ", user.name),
        }
    }

    /// Reads commands from `input` until `quit` or end of input.
    pub async fn run<R>(&mut self, input: R) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin + Send,
    {
        let mut lines = input.lines();
        println!("{}", self.start().await);

        loop {
            print!("{}", self.prompt());
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    println!("{}", e.message);
                    continue;
                }
            };

            let mut confirm = LineConfirm { lines: &mut lines };
            match self.execute(command, &mut confirm).await {
                Ok(Outcome::Continue(text)) => println!("{}", text),
                Ok(Outcome::Quit) => break,
                Err(e) => println!("! {}", e.message),
            }
        }
        Ok(())
    }
}

/// Confirms on the next input line: `y` or `yes`, anything else declines.
struct LineConfirm<'a, R> {
    lines: &'a mut Lines<R>,
}

#[async_trait]
impl<R> Confirm for LineConfirm<'_, R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn confirm(&mut self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if std::io::stdout().flush().is_err() {
            return false;
        }
        match self.lines.next_line().await {
            Ok(Some(answer)) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }
}
