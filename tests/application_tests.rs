use cellview::test_utils::ScriptedScreen;
use cellview::widget::InputField;
use cellview::{
    press, release, Application, Block, Error, Event, Handler, KeyCode, KeyEvent, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind, Primitive, Rect, RequestFocus, ScreenConfig, Theme,
};
use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

type Log = Arc<Mutex<Vec<String>>>;

/// Primitive that records its lifecycle calls and collects typed characters
struct Recorder {
    name: &'static str,
    block: Block,
    log: Log,
    typed: Mutex<String>,
    /// Primitive to hand focus to when focused
    redirect: Mutex<Option<Arc<dyn Primitive>>>,
    /// Time `blur` takes before clearing the focus flag
    blur_delay: Mutex<Duration>,
}

impl Recorder {
    fn new(name: &'static str, log: &Log) -> Arc<Self> {
        Arc::new(Self {
            name,
            block: Block::new(&Theme::default()),
            log: log.clone(),
            typed: Mutex::new(String::new()),
            redirect: Mutex::new(None),
            blur_delay: Mutex::new(Duration::ZERO),
        })
    }

    fn typed(&self) -> String {
        self.typed.lock().clone()
    }

    fn record(&self, what: &str) {
        self.log.lock().push(format!("{} {}", what, self.name));
    }
}

impl Primitive for Recorder {
    fn draw(&self, screen: &dyn cellview::Screen) {
        self.record("draw");
        self.block.draw(screen);
    }

    fn rect(&self) -> Rect {
        self.block.rect()
    }

    fn set_rect(&self, rect: Rect) {
        self.block.set_rect(rect);
    }

    fn inner_rect(&self) -> Rect {
        self.block.inner_rect()
    }

    fn focus(&self, request_focus: RequestFocus<'_>) {
        self.record("focus");
        let redirect = self.redirect.lock().clone();
        match redirect {
            Some(target) => request_focus(target),
            None => self.block.focus(request_focus),
        }
    }

    fn blur(&self) {
        self.record("blur");
        let delay = *self.blur_delay.lock();
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        self.block.blur();
    }

    fn has_focus(&self) -> bool {
        self.block.has_focus()
    }

    fn key_handler(&self) -> Option<Handler<'_, KeyEvent>> {
        Some(self.block.wrap_handler(|event: &KeyEvent, _| {
            if let KeyCode::Char(ch) = event.code {
                if ch == '!' {
                    panic!("handler failure");
                }
                self.typed.lock().push(ch);
            }
        }))
    }

    fn character_handler(&self) -> Option<Handler<'_, char>> {
        Some(self.block.wrap_handler(|ch: &char, _| self.typed.lock().push(*ch)))
    }

    fn mouse_handler(&self) -> Option<Handler<'_, MouseEvent>> {
        Some(Box::new(
            |event: &MouseEvent, _request_focus: &dyn Fn(Arc<dyn Primitive>)| {
                self.record(&format!("mouse {}:{}", event.column, event.row));
            },
        ))
    }
}

fn new_log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

fn key(ch: char) -> Event {
    Event::Key(press(KeyCode::Char(ch)))
}

fn quit_release() -> Event {
    Event::Key(release(KeyCode::Char('c'), KeyModifiers::CONTROL))
}

fn app_on(screen: &Arc<ScriptedScreen>) -> Application {
    Application::with_screen_factory(ScreenConfig::default(), screen.factory())
}

fn wait_until(what: &str, condition: impl Fn() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while !condition() {
        assert!(Instant::now() < deadline, "timed out waiting for {what}");
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_end_to_end_scenario() {
    let screen = Arc::new(ScriptedScreen::with_events(
        10,
        5,
        [Event::Resize { width: 80, height: 24 }, key('a'), quit_release()],
    ));
    let app = app_on(&screen);
    let log = new_log();
    let root = Recorder::new("root", &log);
    app.set_root(root.clone(), true);

    app.run().unwrap();

    assert_eq!(root.typed(), "a");
    assert_eq!(screen.init_calls(), 1);
    assert_eq!(screen.fini_calls(), 1);
    assert!(!app.is_running());
}

#[test]
fn test_single_focus() {
    let app = Application::new(ScreenConfig::default());
    let log = new_log();
    let prims = [
        Recorder::new("a", &log),
        Recorder::new("b", &log),
        Recorder::new("c", &log),
    ];

    for target in [0, 2, 1, 1, 0] {
        app.set_focus(prims[target].clone());
        let focused: Vec<_> = prims.iter().filter(|p| p.has_focus()).collect();
        assert_eq!(focused.len(), 1);
        assert_eq!(focused[0].name, prims[target].name);
    }
}

#[test]
fn test_blur_before_focus() {
    let app = Application::new(ScreenConfig::default());
    let log = new_log();
    let (a, b) = (Recorder::new("a", &log), Recorder::new("b", &log));

    app.set_focus(a.clone());
    app.set_focus(b.clone());

    assert_eq!(*log.lock(), vec!["focus a", "blur a", "focus b"]);
}

#[test]
fn test_refocusing_same_primitive_does_not_blur() {
    let app = Application::new(ScreenConfig::default());
    let log = new_log();
    let a = Recorder::new("a", &log);

    app.set_focus(a.clone());
    app.set_focus(a.clone());

    assert_eq!(*log.lock(), vec!["focus a", "focus a"]);
    assert!(a.has_focus());
}

#[test]
fn test_focus_redirect_from_focus_callback() {
    let app = Application::new(ScreenConfig::default());
    let log = new_log();
    let (container, child) = (Recorder::new("container", &log), Recorder::new("child", &log));
    *container.redirect.lock() = Some(child.clone());

    app.set_root(container.clone(), false);

    let focused = app.get_focus().unwrap();
    assert!(cellview::same_primitive(&focused, &(child.clone() as Arc<dyn Primitive>)));
    assert!(child.has_focus());
    assert!(!container.has_focus());
    assert_eq!(
        *log.lock(),
        vec!["focus container", "blur container", "focus child"]
    );
}

#[test]
fn test_fullscreen_resize() {
    let screen = Arc::new(ScriptedScreen::with_events(
        10,
        5,
        [Event::Resize { width: 80, height: 24 }],
    ));
    let app = app_on(&screen);
    let root = Recorder::new("root", &new_log());
    app.set_root(root.clone(), true);

    app.run().unwrap();

    assert_eq!(root.rect(), Rect::new(0, 0, 80, 24));
}

#[test]
fn test_draw_without_screen_is_noop() {
    let app = Application::new(ScreenConfig::default());
    let log = new_log();
    app.set_root(Recorder::new("root", &log), true);
    log.lock().clear();

    app.draw();
    assert!(log.lock().is_empty());
}

#[test]
fn test_draw_without_root_does_not_flush() {
    let screen = Arc::new(ScriptedScreen::with_events(10, 5, [key('a')]));
    let app = app_on(&screen);

    app.run().unwrap();
    assert_eq!(screen.show_calls(), 0);
}

#[test]
fn test_before_draw_short_circuit() {
    let screen = Arc::new(ScriptedScreen::new(10, 5));
    let app = app_on(&screen);
    let log = new_log();
    app.set_root(Recorder::new("root", &log), true);
    let after = Arc::new(AtomicUsize::new(0));
    let after_count = after.clone();
    app.set_before_draw_func(|_| true)
        .set_after_draw_func(move |_| {
            after_count.fetch_add(1, Ordering::SeqCst);
        });
    log.lock().clear();

    app.run().unwrap();

    assert!(!log.lock().iter().any(|entry| entry.starts_with("draw")));
    assert_eq!(after.load(Ordering::SeqCst), 0);
    assert_eq!(screen.show_calls(), 1);
}

#[test]
fn test_after_draw_runs_after_root() {
    let screen = Arc::new(ScriptedScreen::new(10, 5));
    let app = app_on(&screen);
    let log = new_log();
    app.set_root(Recorder::new("root", &log), true);
    let hook_log = log.clone();
    app.set_before_draw_func(|_| false)
        .set_after_draw_func(move |_| hook_log.lock().push("after".to_string()));
    log.lock().clear();

    app.run().unwrap();

    assert_eq!(*log.lock(), vec!["draw root", "after"]);
    assert_eq!(screen.show_calls(), 1);
}

#[test]
fn test_hooks_can_be_cleared() {
    let app = Application::new(ScreenConfig::default());
    app.set_input_capture(Some).set_before_draw_func(|_| true);
    assert!(app.get_input_capture().is_some());
    assert!(app.get_before_draw_func().is_some());

    app.clear_input_capture().clear_before_draw_func();
    assert!(app.get_input_capture().is_none());
    assert!(app.get_before_draw_func().is_none());
    assert!(app.get_after_draw_func().is_none());
}

#[test]
fn test_capture_suppression() {
    let screen = Arc::new(ScriptedScreen::with_events(10, 5, [key('x'), key('y')]));
    let app = app_on(&screen);
    let root = Recorder::new("root", &new_log());
    app.set_root(root.clone(), true);
    app.set_input_capture(|event| (event != key('x')).then_some(event));

    app.run().unwrap();
    assert_eq!(root.typed(), "y");
}

#[test]
fn test_capture_substitution() {
    let screen = Arc::new(ScriptedScreen::with_events(
        10,
        5,
        [key('x'), Event::Character('p')],
    ));
    let app = app_on(&screen);
    let root = Recorder::new("root", &new_log());
    app.set_root(root.clone(), true);
    app.set_input_capture(|event| {
        if event == key('x') {
            Some(key('z'))
        } else {
            Some(event)
        }
    });

    app.run().unwrap();
    assert_eq!(root.typed(), "zp");
}

#[test]
fn test_capture_can_swallow_quit_press() {
    let screen = Arc::new(ScriptedScreen::with_events(
        10,
        5,
        [Event::Key(cellview::ctrl_c()), key('a')],
    ));
    let app = app_on(&screen);
    let root = Recorder::new("root", &new_log());
    app.set_root(root.clone(), true);
    app.set_input_capture(|event| (!event.is_quit()).then_some(event));

    app.run().unwrap();
    assert_eq!(root.typed(), "a");
}

#[test]
fn test_quit_release_bypasses_capture() {
    let screen = Arc::new(ScriptedScreen::with_events(10, 5, [quit_release(), key('a')]));
    let app = app_on(&screen);
    let root = Recorder::new("root", &new_log());
    app.set_root(root.clone(), true);
    let captured = Arc::new(AtomicUsize::new(0));
    let count = captured.clone();
    app.set_input_capture(move |event| {
        count.fetch_add(1, Ordering::SeqCst);
        Some(event)
    });

    app.run().unwrap();

    assert_eq!(captured.load(Ordering::SeqCst), 0);
    assert_eq!(root.typed(), "");
    assert_eq!(screen.fini_calls(), 1);
}

#[test]
fn test_quit_press_stops() {
    let screen = Arc::new(ScriptedScreen::with_events(
        10,
        5,
        [Event::Key(cellview::ctrl_c()), key('a')],
    ));
    let app = app_on(&screen);
    let root = Recorder::new("root", &new_log());
    app.set_root(root.clone(), true);

    app.run().unwrap();

    assert_eq!(root.typed(), "");
    assert_eq!(screen.fini_calls(), 1);
}

#[test]
fn test_other_releases_are_dropped() {
    let screen = Arc::new(ScriptedScreen::with_events(
        10,
        5,
        [
            Event::Key(release(KeyCode::Char('r'), KeyModifiers::NONE)),
            key('k'),
        ],
    ));
    let app = app_on(&screen);
    let root = Recorder::new("root", &new_log());
    app.set_root(root.clone(), true);

    app.run().unwrap();
    assert_eq!(root.typed(), "k");
}

#[test]
fn test_key_handler_triggers_draw() {
    let screen = Arc::new(ScriptedScreen::with_events(10, 5, [key('a'), key('b')]));
    let app = app_on(&screen);
    app.set_root(Recorder::new("root", &new_log()), true);

    app.run().unwrap();
    // Initial frame plus one per handled key
    assert_eq!(screen.show_calls(), 3);
}

#[test]
fn test_mouse_goes_to_root_not_focus() {
    let click = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 3,
        row: 2,
        modifiers: KeyModifiers::NONE,
    };
    let screen = Arc::new(ScriptedScreen::with_events(10, 5, [Event::Mouse(click)]));
    let app = app_on(&screen);
    let log = new_log();
    let (root, other) = (Recorder::new("root", &log), Recorder::new("other", &log));
    app.set_root(root.clone(), true);
    app.set_focus(other.clone());
    log.lock().clear();

    app.run().unwrap();

    let log = log.lock();
    assert!(log.contains(&"mouse 3:2 root".to_string()));
    assert!(!log.iter().any(|entry| entry.ends_with("other") && entry.starts_with("mouse")));
}

#[test]
fn test_backend_init_failure() {
    let screen = Arc::new(ScriptedScreen::failing(10, 5));
    let app = app_on(&screen);

    let result = app.run();

    assert!(matches!(result, Err(Error::BackendInit(_))));
    assert_eq!(screen.fini_calls(), 0);
    assert!(!app.is_running());
}

#[test]
fn test_panic_releases_screen() {
    let screen = Arc::new(ScriptedScreen::with_events(10, 5, [key('!')]));
    let app = app_on(&screen);
    app.set_root(Recorder::new("root", &new_log()), true);

    let result = panic::catch_unwind(AssertUnwindSafe(|| app.run()));

    assert!(result.is_err());
    assert_eq!(screen.fini_calls(), 1);
    assert!(!app.is_running());
    // Stopping again stays a no-op
    app.stop();
    assert_eq!(screen.fini_calls(), 1);
}

#[test]
fn test_stop_from_another_thread() {
    let screen = Arc::new(ScriptedScreen::held_open(10, 5));
    let app = Arc::new(app_on(&screen));
    app.set_root(Recorder::new("root", &new_log()), true);

    let runner = {
        let app = app.clone();
        thread::spawn(move || app.run())
    };
    wait_until("the loop to start", || app.is_running());

    app.stop();
    runner.join().unwrap().unwrap();

    assert_eq!(screen.fini_calls(), 1);
    app.stop();
    assert_eq!(screen.fini_calls(), 1);
}

#[test]
fn test_events_pushed_while_running() {
    let screen = Arc::new(ScriptedScreen::held_open(10, 5));
    let app = Arc::new(app_on(&screen));
    let root = Recorder::new("root", &new_log());
    app.set_root(root.clone(), true);

    let runner = {
        let app = app.clone();
        thread::spawn(move || app.run())
    };
    wait_until("the loop to start", || app.is_running());

    screen.push_event(key('h'));
    screen.push_event(key('i'));
    wait_until("both keys", || root.typed() == "hi");

    screen.push_event(quit_release());
    runner.join().unwrap().unwrap();
    assert_eq!(screen.fini_calls(), 1);
}

#[test]
fn test_suspend_and_resume() {
    let screen = Arc::new(ScriptedScreen::held_open(10, 5));
    let app = Arc::new(app_on(&screen));
    app.set_root(Recorder::new("root", &new_log()), true);

    let runner = {
        let app = app.clone();
        thread::spawn(move || app.run())
    };
    wait_until("the loop to start", || app.is_running());

    let clears_before = screen.clear_calls();
    let mut ran = false;
    assert!(app.suspend(|| ran = true));
    assert!(ran);
    assert_eq!(screen.suspend_calls(), 1);
    assert_eq!(screen.resume_calls(), 1);
    assert!(screen.clear_calls() > clears_before);
    assert!(app.is_running());

    app.stop();
    runner.join().unwrap().unwrap();
}

#[test]
fn test_suspend_panic_stops_application() {
    let screen = Arc::new(ScriptedScreen::held_open(10, 5));
    let app = Arc::new(app_on(&screen));

    let runner = {
        let app = app.clone();
        thread::spawn(move || app.run())
    };
    wait_until("the loop to start", || app.is_running());

    let result = panic::catch_unwind(AssertUnwindSafe(|| app.suspend(|| panic!("suspended work failed"))));
    assert!(result.is_err());

    runner.join().unwrap().unwrap();
    assert!(!app.is_running());
    assert_eq!(screen.fini_calls(), 1);
}

#[test]
fn test_capture_focus_change_applies_to_next_event() {
    let screen = Arc::new(ScriptedScreen::with_events(10, 5, [key('n'), key('m')]));
    let app = Arc::new(app_on(&screen));
    let log = new_log();
    let (first, second) = (Recorder::new("first", &log), Recorder::new("second", &log));
    app.set_root(first.clone(), true);

    // Move focus and redraw from inside the capture hook
    let weak = Arc::downgrade(&app);
    let target: Arc<dyn Primitive> = second.clone();
    app.set_input_capture(move |event| {
        if let Some(app) = weak.upgrade() {
            app.set_focus(target.clone());
            app.draw();
        }
        Some(event)
    });

    app.run().unwrap();

    // 'n' was routed to the blurred first primitive and dropped by its guard
    assert!(second.has_focus());
    assert!(!first.has_focus());
    assert_eq!(first.typed(), "");
    assert_eq!(second.typed(), "m");
}

#[test]
fn test_focus_guard_drops_stale_handler() {
    let log = new_log();
    let recorder = Recorder::new("stale", &log);
    let handler = recorder.key_handler().unwrap();
    handler(&press(KeyCode::Char('q')), &|_| {});
    assert_eq!(recorder.typed(), "");
}

#[test]
fn test_concurrent_focus_changes_leave_one_focus() {
    let app = Arc::new(Application::new(ScreenConfig::default()));
    let log = new_log();
    let (x, a, b) = (
        Recorder::new("x", &log),
        Recorder::new("a", &log),
        Recorder::new("b", &log),
    );
    app.set_focus(x.clone());
    *x.blur_delay.lock() = Duration::from_millis(150);

    let mover = {
        let (app, a) = (app.clone(), a.clone());
        thread::spawn(move || {
            app.set_focus(a);
        })
    };
    thread::sleep(Duration::from_millis(40));
    app.set_focus(b.clone());
    mover.join().unwrap();

    let prims = [&x, &a, &b];
    let focused: Vec<_> = prims.iter().filter(|p| p.has_focus()).collect();
    assert_eq!(focused.len(), 1);
    let current = app.get_focus().unwrap();
    let expected: Arc<dyn Primitive> = (*focused[0]).clone();
    assert!(cellview::same_primitive(&current, &expected));
}

#[test]
fn test_resize_clears_before_redraw() {
    let screen = Arc::new(ScriptedScreen::with_events(
        10,
        5,
        [Event::Resize { width: 12, height: 6 }],
    ));
    let app = app_on(&screen);
    let log = new_log();
    app.set_root(Recorder::new("root", &log), true);

    let clears_at_draw = Arc::new(Mutex::new(Vec::new()));
    let (seen, counted) = (clears_at_draw.clone(), screen.clone());
    app.set_before_draw_func(move |_| {
        seen.lock().push(counted.clear_calls());
        false
    });

    app.run().unwrap();

    let clears = clears_at_draw.lock().clone();
    assert_eq!(clears.len(), 2);
    assert_eq!(clears[1], clears[0] + 1);
}

#[test]
fn test_set_root_while_running_clears() {
    let screen = Arc::new(ScriptedScreen::held_open(10, 5));
    let app = Arc::new(app_on(&screen));
    let log = new_log();
    app.set_root(Recorder::new("first", &log), true);

    let runner = {
        let app = app.clone();
        thread::spawn(move || app.run())
    };
    wait_until("the loop to start", || app.is_running());

    let clears_before = screen.clear_calls();
    app.set_root(Recorder::new("second", &log), true);
    assert_eq!(screen.clear_calls(), clears_before + 1);

    app.stop();
    runner.join().unwrap().unwrap();
}

#[test]
fn test_set_focus_while_running_hides_cursor() {
    let theme = Theme::default();
    let screen = Arc::new(ScriptedScreen::held_open(10, 2));
    let app = Arc::new(app_on(&screen));
    let field = Arc::new(InputField::new(&theme));
    app.set_root(field.clone(), true);

    let runner = {
        let app = app.clone();
        thread::spawn(move || app.run())
    };
    wait_until("the field to show its cursor", || screen.cursor().is_some());

    app.set_focus(Arc::new(Block::new(&theme)));
    assert_eq!(screen.cursor(), None);
    assert!(!field.has_focus());

    app.stop();
    runner.join().unwrap().unwrap();
}

#[test]
fn test_second_run_is_rejected() {
    let screen = Arc::new(ScriptedScreen::held_open(10, 5));
    let app = Arc::new(app_on(&screen));

    let runner = {
        let app = app.clone();
        thread::spawn(move || app.run())
    };
    wait_until("the loop to start", || app.is_running());

    assert!(matches!(app.run(), Err(Error::AlreadyRunning)));
    assert!(app.is_running());
    assert_eq!(screen.init_calls(), 1);
    assert_eq!(screen.fini_calls(), 0);

    app.stop();
    runner.join().unwrap().unwrap();
    assert_eq!(screen.fini_calls(), 1);
}
