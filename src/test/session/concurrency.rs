use crate::{
    test::{readers, usecase::*},
    Options, E,
};
use std::sync::atomic::{AtomicUsize, Ordering};

static TWO_ACTIVE: AtomicUsize = AtomicUsize::new(0);
static TWO_PEAK: AtomicUsize = AtomicUsize::new(0);

struct Two;

impl readers::Gauge for Two {
    fn active() -> &'static AtomicUsize {
        &TWO_ACTIVE
    }
    fn peak() -> &'static AtomicUsize {
        &TWO_PEAK
    }
}

static ONE_ACTIVE: AtomicUsize = AtomicUsize::new(0);
static ONE_PEAK: AtomicUsize = AtomicUsize::new(0);

struct One;

impl readers::Gauge for One {
    fn active() -> &'static AtomicUsize {
        &ONE_ACTIVE
    }
    fn peak() -> &'static AtomicUsize {
        &ONE_PEAK
    }
}

static MANY_ACTIVE: AtomicUsize = AtomicUsize::new(0);
static MANY_PEAK: AtomicUsize = AtomicUsize::new(0);

struct Many;

impl readers::Gauge for Many {
    fn active() -> &'static AtomicUsize {
        &MANY_ACTIVE
    }
    fn peak() -> &'static AtomicUsize {
        &MANY_PEAK
    }
}

#[test]
fn no_more_than_threads() -> Result<(), E> {
    let usecase = UseCase::gen(30, 2000..4000)?;
    let mut opt = Options::new();
    opt.paths(usecase.files.iter().cloned())?
        .threads(2)?
        .block_size(512)?;
    let results = opt.session()?.hash::<readers::Counting<Two>>()?;
    assert_eq!(results.len(), 30);
    assert_eq!(results.failed(), 0);
    assert!(TWO_PEAK.load(Ordering::SeqCst) <= 2);
    assert_eq!(TWO_ACTIVE.load(Ordering::SeqCst), 0);
    usecase.clean()?;
    Ok(())
}

#[test]
fn with_one_thread() -> Result<(), E> {
    let usecase = UseCase::gen(10, 100..1000)?;
    let mut opt = Options::new();
    opt.paths(usecase.files.iter().cloned())?.threads(1)?;
    let results = opt.session()?.hash::<readers::Counting<One>>()?;
    assert_eq!(results.len(), 10);
    assert_eq!(results.failed(), 0);
    assert_eq!(ONE_PEAK.load(Ordering::SeqCst), 1);
    usecase.clean()?;
    Ok(())
}

#[test]
fn files_overlap_in_time() -> Result<(), E> {
    let usecase = UseCase::gen(16, 4000..8000)?;
    let mut opt = Options::new();
    opt.paths(usecase.files.iter().cloned())?
        .threads(4)?
        .block_size(256)?;
    let results = opt.session()?.hash::<readers::Counting<Many>>()?;
    assert_eq!(results.failed(), 0);
    let peak = MANY_PEAK.load(Ordering::SeqCst);
    assert!(peak > 1 && peak <= 4);
    usecase.clean()?;
    Ok(())
}

#[test]
fn more_threads_than_files() -> Result<(), E> {
    let usecase = UseCase::gen(3, 10..100)?;
    let mut opt = Options::new();
    opt.paths(usecase.files.iter().cloned())?.threads(64)?;
    let results = opt.session()?.hash::<crate::reader::buffering::Buffering>()?;
    assert_eq!(results.len(), 3);
    assert_eq!(results.failed(), 0);
    usecase.clean()?;
    Ok(())
}
