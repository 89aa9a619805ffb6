// TeachPortal terminal shell
//
// Wires configuration, session storage, and the API client together, owns
// navigation, and drives the headless views from a small command loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

use teachportal_app::{DashboardView, LoginView, SignupView, TeacherOverviewView};
use teachportal_client::{PortalApi, PortalClient};
use teachportal_common::Config;
use teachportal_session::{FileSessionStore, SessionManager};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!(api_url = %config.api_url, "Starting TeachPortal shell");

    let store = Arc::new(FileSessionStore::new(config.session_file.clone()));
    let session = SessionManager::new(store);

    // The shell owns navigation: a 401/403 anywhere flips this flag and the
    // loop drops back to the login prompt.
    let kicked_out = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&kicked_out);
    let client = PortalClient::new(&config, session.clone()).with_auth_failure_handler(Arc::new(
        move || {
            handler_flag.store(true, Ordering::SeqCst);
        },
    ));
    let api: Arc<dyn PortalApi> = Arc::new(client);

    let mut dashboard = DashboardView::new(Arc::clone(&api), session.clone());
    let mut overview = TeacherOverviewView::new(Arc::clone(&api));

    println!("TeachPortal shell. Type `help` for commands.");
    if session.is_authenticated() {
        println!("Signed in (teacher {}).", session.subject_id().unwrap_or_default());
    } else {
        println!("Not signed in. Use `login <username> <password>`.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_prompt();
    while let Some(line) = lines.next_line().await? {
        let args: Vec<&str> = line.split_whitespace().collect();
        match args.as_slice() {
            [] => {}
            ["help"] => print_help(),
            ["quit"] | ["exit"] => break,

            ["login", username, password] => {
                let mut view = LoginView::new(Arc::clone(&api));
                view.username = username.to_string();
                view.password = password.to_string();
                if view.submit().await {
                    kicked_out.store(false, Ordering::SeqCst);
                    println!(
                        "Signed in (teacher {}).",
                        session.subject_id().unwrap_or_default()
                    );
                } else {
                    report_form_errors(&view.errors, &view.error);
                }
            }

            ["signup", user_name, first, last, email, password] => {
                let mut view = SignupView::new(Arc::clone(&api));
                view.user_name = user_name.to_string();
                view.first_name = first.to_string();
                view.last_name = last.to_string();
                view.email = email.to_string();
                view.password = password.to_string();
                view.confirm = password.to_string();
                if view.submit().await {
                    println!("Account created. You can now log in.");
                } else {
                    report_form_errors(&view.errors, &view.error);
                }
            }

            ["logout"] => {
                session.logout();
                println!("Signed out.");
            }

            ["whoami"] => match session.subject_id() {
                Some(id) if session.is_authenticated() => println!("Teacher {id}"),
                _ => println!("Not signed in."),
            },

            ["students"] => {
                if require_login(&dashboard, &kicked_out) {
                    dashboard.refresh().await;
                    render_dashboard(&dashboard);
                }
            }

            ["add", first, last, email] => {
                if require_login(&dashboard, &kicked_out) {
                    dashboard.first_name = first.to_string();
                    dashboard.last_name = last.to_string();
                    dashboard.email = email.to_string();
                    if dashboard.add_student().await {
                        println!("Student added.");
                    } else if !dashboard.errors.is_valid() {
                        println!("{}", dashboard.errors.summary());
                    } else {
                        println!("{}", dashboard.error);
                    }
                }
            }

            ["search", rest @ ..] => {
                dashboard.table.set_query(&rest.join(" "));
                render_dashboard(&dashboard);
            }

            ["sort", column] => {
                dashboard.table.toggle_sort(column);
                render_dashboard(&dashboard);
            }

            ["page", n] => match n.parse() {
                Ok(page) => {
                    dashboard.table.set_page(page);
                    render_dashboard(&dashboard);
                }
                Err(_) => println!("Usage: page <number>"),
            },

            ["pagesize", n] => match n.parse() {
                Ok(size) => {
                    dashboard.table.set_page_size(size);
                    render_dashboard(&dashboard);
                }
                Err(_) => println!("Usage: pagesize <number>"),
            },

            ["teachers"] => {
                overview.refresh().await;
                if overview.error.is_empty() {
                    let (teachers, students) = overview.totals();
                    println!("Teachers: {teachers}  Students: {students}");
                    for t in overview.teachers.visible() {
                        println!(
                            "  [{}] {} <{}> ({} students)",
                            t.teacher_id().map_or("-".to_string(), |id| id.to_string()),
                            t.display_name(),
                            t.email.as_deref().unwrap_or("-"),
                            t.student_count,
                        );
                    }
                } else {
                    println!("{}", overview.error);
                }
                check_kicked_out(&kicked_out);
            }

            ["view", teacher_id] => {
                let teacher = overview
                    .teachers
                    .filtered_sorted()
                    .into_iter()
                    .find(|t| t.teacher_id().map_or(false, |id| id.to_string() == *teacher_id));
                match teacher {
                    Some(t) => {
                        overview.select_teacher(t).await;
                        if overview.student_error.is_empty() {
                            for s in &overview.students {
                                println!("  {} {} <{}>", s.first_name, s.last_name, s.email);
                            }
                        } else {
                            println!("{}", overview.student_error);
                        }
                        check_kicked_out(&kicked_out);
                    }
                    None => println!("No such teacher; run `teachers` first."),
                }
            }

            _ => println!("Unknown command. Type `help`."),
        }
        print_prompt();
    }

    Ok(())
}

fn print_prompt() {
    use std::io::Write;
    print!("> ");
    let _ = std::io::stdout().flush();
}

fn print_help() {
    println!("Commands:");
    println!("  login <username> <password>");
    println!("  signup <username> <first> <last> <email> <password>");
    println!("  students | add <first> <last> <email>");
    println!("  search <text> | sort <firstName|lastName|email> | page <n> | pagesize <n>");
    println!("  teachers | view <teacherId>");
    println!("  whoami | logout | quit");
}

/// Gate an authenticated view the way a route guard would
fn require_login(dashboard: &DashboardView, kicked_out: &AtomicBool) -> bool {
    if dashboard.authorized() {
        true
    } else {
        kicked_out.store(false, Ordering::SeqCst);
        println!("Session expired or missing. Use `login <username> <password>`.");
        false
    }
}

fn check_kicked_out(kicked_out: &AtomicBool) {
    if kicked_out.swap(false, Ordering::SeqCst) {
        println!("Your session was rejected by the server. Please log in again.");
    }
}

fn render_dashboard(view: &DashboardView) {
    if !view.error.is_empty() {
        println!("{}", view.error);
        return;
    }
    let rows = view.table.visible();
    if rows.is_empty() {
        println!("No students to display.");
        return;
    }
    for s in &rows {
        println!("  {} {} <{}>", s.first_name, s.last_name, s.email);
    }
    println!(
        "Page {} of {}",
        view.table.current_page(),
        view.table.total_pages()
    );
}

fn report_form_errors(errors: &teachportal_common::FieldErrors, top_level: &str) {
    if !errors.is_valid() {
        println!("{}", errors.summary());
    } else if !top_level.is_empty() {
        println!("{top_level}");
    } else {
        println!("Request failed. Please try again.");
    }
}
