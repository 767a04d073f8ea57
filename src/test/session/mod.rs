mod concurrency;

use crate::{
    hash_files,
    reader::buffering::Buffering,
    session,
    test::{readers, usecase::*, utils},
    Algorithm, AlgorithmSpec, ErrorKind, Hasher, Options, Tolerance, E,
};
use std::{fs::OpenOptions, path::PathBuf};

#[test]
fn hello_empty_missed() -> Result<(), E> {
    let usecase = UseCase::named(&[("a", b"hello"), ("b", b"")])?;
    let missed = usecase.missed("c");
    let paths = vec![usecase.files[0].clone(), usecase.files[1].clone(), missed.clone()];
    let results = hash_files(&paths[..], &["md5", "sha256"], 2)?;
    assert_eq!(results.len(), 3);
    let a = utils::unwrap_result(results.get(&paths[0]));
    assert_eq!(a.size, 5);
    assert_eq!(a.digest("md5"), Some("5d41402abc4b2a76b9719d911017c592"));
    assert_eq!(
        a.digest("sha256"),
        Some("2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824")
    );
    let b = utils::unwrap_result(results.get(&paths[1]));
    assert_eq!(b.size, 0);
    assert_eq!(b.digest("md5"), Some("d41d8cd98f00b204e9800998ecf8427e"));
    assert!(matches!(
        results.get(&missed),
        Some(Err(err)) if err.kind() == ErrorKind::OpenFailed
    ));
    assert_eq!(results.failed(), 1);
    assert_eq!(
        results.iter().map(|(p, _)| p.to_path_buf()).collect::<Vec<_>>(),
        paths
    );
    usecase.clean()?;
    Ok(())
}

#[test]
fn correction() -> Result<(), E> {
    let usecase = UseCase::gen(40, 0..200_000)?;
    let mut opt = Options::new();
    opt.paths(usecase.files.iter().cloned())?
        .threads(4)?
        .block_size(64 * 1024)?;
    let results = opt.session()?.hash::<Buffering>()?;
    assert_eq!(results.len(), usecase.files.len());
    assert_eq!(results.failed(), 0);
    for file in usecase.files.iter() {
        let result = utils::unwrap_result(results.get(file));
        assert_eq!(result.digests, utils::reference(file)?);
        assert_eq!(result.size, file.metadata()?.len());
    }
    usecase.clean()?;
    Ok(())
}

#[test]
fn determinism() -> Result<(), E> {
    let usecase = UseCase::gen(20, 1000..50_000)?;
    let mut opt = Options::new();
    opt.paths(usecase.files.iter().cloned())?
        .algorithms(["md5", "blake3", "entropy"])?;
    let session = opt.session()?;
    let a = session.hash::<Buffering>()?;
    let b = session.hash::<Buffering>()?;
    for file in usecase.files.iter() {
        assert_eq!(
            utils::unwrap_result(a.get(file)),
            utils::unwrap_result(b.get(file))
        );
    }
    usecase.clean()?;
    Ok(())
}

#[test]
fn block_size_independence() -> Result<(), E> {
    let usecase = UseCase::gen(10, 0..30_000)?;
    let mut outputs = Vec::new();
    for block_size in [1, 333, 4095, 1024 * 1024] {
        let mut opt = Options::new();
        opt.paths(usecase.files.iter().cloned())?
            .algorithms(["sha1", "sha512", "blake3", "entropy"])?
            .block_size(block_size)?;
        let results = opt.session()?.hash::<Buffering>()?;
        let digests: Vec<_> = usecase
            .files
            .iter()
            .map(|file| utils::unwrap_result(results.get(file)).clone())
            .collect();
        outputs.push(digests);
    }
    for output in outputs.iter().skip(1) {
        assert_eq!(&outputs[0], output);
    }
    usecase.clean()?;
    Ok(())
}

#[test]
fn failure_is_isolated() -> Result<(), E> {
    let usecase = UseCase::gen(10, 1..10_000)?;
    let mut paths = usecase.files.clone();
    paths.insert(3, usecase.missed("a"));
    paths.insert(7, usecase.root.clone());
    paths.push(usecase.missed("b"));
    let mut opt = Options::new();
    opt.paths(paths.iter().cloned())?
        .threads(3)?
        .tolerance(Tolerance::DoNotLogErrors);
    let results = opt.session()?.hash::<Buffering>()?;
    assert_eq!(results.len(), paths.len());
    assert_eq!(results.failed(), 3);
    assert_eq!(results.failed_with(ErrorKind::OpenFailed), 3);
    for file in usecase.files.iter() {
        assert_eq!(
            utils::unwrap_result(results.get(file)).digests,
            utils::reference(file)?
        );
    }
    usecase.clean()?;
    Ok(())
}

#[test]
fn read_failures_are_isolated() -> Result<(), E> {
    // Faulty reader breaks files which take more than one block
    let usecase = UseCase::gen(6, 5000..6000)?;
    let small = UseCase::named(&[("a", b"abc"), ("b", b"")])?;
    let mut opt = Options::new();
    opt.paths(usecase.files.iter().chain(small.files.iter()).cloned())?
        .block_size(1024)?
        .threads(2)?;
    let results = opt.session()?.hash::<readers::Faulty>()?;
    assert_eq!(results.len(), 8);
    assert_eq!(results.failed(), 7);
    assert_eq!(results.failed_with(ErrorKind::ReadFailed), 7);
    // Empty file is done with the first read
    assert_eq!(utils::unwrap_result(results.get(&small.files[1])).size, 0);
    usecase.clean()?;
    small.clean()?;
    Ok(())
}

/// Hasher which truncates the given file to zero length as soon as it gets the first block.
struct Truncating {
    target: PathBuf,
    truncated: bool,
}

impl Hasher for Truncating {
    fn absorb(&mut self, _data: &[u8]) -> Result<(), crate::hasher::E> {
        if !self.truncated {
            self.truncated = true;
            OpenOptions::new()
                .write(true)
                .open(&self.target)
                .and_then(|file| file.set_len(0))
                .map_err(crate::hasher::E::other)?;
        }
        Ok(())
    }
    fn finish(&mut self) -> Result<(), crate::hasher::E> {
        Ok(())
    }
    fn hash(&self) -> Result<&[u8], crate::hasher::E> {
        Ok(&[])
    }
}

#[test]
fn file_truncated_while_hashing() -> Result<(), E> {
    let usecase = UseCase::gen(1, 1024 * 1024..1024 * 1024 + 1)?;
    let sibling = UseCase::named(&[("a", b"hello")])?;
    let target = usecase.files[0].clone();
    let factory_target = target.clone();
    let mut opt = Options::new();
    opt.path(&target)?
        .path(&sibling.files[0])?
        .algorithm(Algorithm::Md5)?
        .algorithm(AlgorithmSpec::new("truncating", move || {
            Box::new(Truncating {
                target: factory_target.clone(),
                truncated: false,
            })
        }))?
        .block_size(4096)?
        .threads(1)?;
    let results = opt.session()?.hash::<Buffering>()?;
    assert_eq!(results.len(), 2);
    // Reading stops at the new end of the file
    let truncated = utils::unwrap_result(results.get(&target));
    assert_eq!(truncated.size, 4096);
    assert_eq!(target.metadata()?.len(), 0);
    let result = utils::unwrap_result(results.get(&sibling.files[0]));
    assert_eq!(result.size, 5);
    assert_eq!(
        result.digest("md5"),
        Some("5d41402abc4b2a76b9719d911017c592")
    );
    usecase.clean()?;
    sibling.clean()?;
    Ok(())
}

#[test]
fn rejected_options_are_kept() -> Result<(), E> {
    let usecase = UseCase::named(&[("a", b"hello")])?;
    let mut opt = Options::new();
    opt.algorithm(Algorithm::Sha256)?
        .tolerance(Tolerance::DoNotLogErrors);
    assert!(matches!(opt.session(), Err(session::E::NoPaths)));
    let session = opt.path(&usecase.files[0])?.session()?;
    assert_eq!(session.algorithms(), vec!["sha256"]);
    assert_eq!(session.count(), 1);
    usecase.clean()?;
    Ok(())
}

#[test]
fn configuration() -> Result<(), E> {
    assert!(matches!(
        Options::new().threads(0),
        Err(session::E::InvalidThreads(0))
    ));
    assert!(matches!(
        Options::new().block_size(0),
        Err(session::E::InvalidBlockSize)
    ));
    assert!(matches!(Options::new().session(), Err(session::E::NoPaths)));
    assert!(matches!(
        Options::new().path("a")?.path("b")?.path("a"),
        Err(session::E::DuplicatePath(..))
    ));
    assert!(matches!(
        Options::new().algorithms(["md5", "whirlpool"]),
        Err(session::E::Hasher(..))
    ));
    assert!(matches!(
        Options::new().algorithms(["md5", "MD5"]),
        Err(session::E::DuplicateAlgorithm(..))
    ));
    let err = hash_files(&["a", "a"], &["md5"], 2).expect_err("duplicates are rejected");
    assert!(err.is_config());
    let err = hash_files(&["a"], &["md5"], 0).expect_err("zero threads are rejected");
    assert!(err.is_config());
    let empty: [&str; 0] = [];
    let err = hash_files(&empty, &["md5"], 1).expect_err("no paths are rejected");
    assert!(err.is_config());
    Ok(())
}

#[test]
fn default_algorithms() -> Result<(), E> {
    let usecase = UseCase::named(&[("a", b"hello")])?;
    let session = Options::new().path(&usecase.files[0])?.session()?;
    assert_eq!(session.algorithms(), vec!["md5", "sha1", "sha256", "sha512"]);
    let results = session.hash::<Buffering>()?;
    assert_eq!(
        utils::unwrap_result(results.get(&usecase.files[0])).digests,
        utils::reference(&usecase.files[0])?
    );
    usecase.clean()?;
    Ok(())
}

#[test]
fn custom_algorithm() -> Result<(), E> {
    let usecase = UseCase::named(&[("a", b"hello")])?;
    let session = Options::new()
        .path(&usecase.files[0])?
        .algorithm(Algorithm::Sha256)?
        .algorithm(AlgorithmSpec::new("my_md5", || {
            Box::new(crate::hasher::digest::Md5::new())
        }))?
        .session()?;
    let results = session.hash::<Buffering>()?;
    let result = utils::unwrap_result(results.get(&usecase.files[0]));
    assert_eq!(result.digests.len(), 2);
    assert_eq!(
        result.digest("my_md5"),
        Some("5d41402abc4b2a76b9719d911017c592")
    );
    usecase.clean()?;
    Ok(())
}

/// Hasher which produces a hash without being finished.
struct Careless;

impl Hasher for Careless {
    fn absorb(&mut self, _data: &[u8]) -> Result<(), crate::hasher::E> {
        Ok(())
    }
    fn finish(&mut self) -> Result<(), crate::hasher::E> {
        Err(crate::hasher::E::AlreadyFinished)
    }
    fn hash(&self) -> Result<&[u8], crate::hasher::E> {
        Err(crate::hasher::E::NotFinished)
    }
}

#[test]
fn invalid_state_is_escalated() -> Result<(), E> {
    let usecase = UseCase::named(&[("a", b"hello"), ("b", b"world")])?;
    let session = Options::new()
        .paths(usecase.files.iter().cloned())?
        .algorithm(AlgorithmSpec::new("careless", || Box::new(Careless)))?
        .session()?;
    assert!(matches!(
        session.hash::<Buffering>(),
        Err(session::E::InvalidState(..))
    ));
    usecase.clean()?;
    Ok(())
}
