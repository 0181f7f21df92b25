//! Scripted trial source shared by the integration tests.

#![allow(dead_code)]

use trialhist::{
    RandomSource, Result, SeededRng, StepInfo, StepResult, TrialParams, TrialSource,
};

/// Reward for a correct response.
pub const R_CORRECT: f64 = 1.0;

/// Trials of fixed length. The observation is a fixation channel followed by
/// a one-hot stimulus for the ground truth; the last step of each trial is
/// the decision step and ends the trial.
pub struct FixedTask {
    rng: SeededRng,
    choices: Vec<usize>,
    steps_per_trial: usize,
    episode_len: usize,

    pub trial_count: u64,
    pub gt: Option<usize>,
    pub step_in_trial: usize,
    pub step_in_episode: usize,
    pub started: Vec<usize>,
    pub params_seen: Vec<TrialParams>,
}

impl FixedTask {
    pub fn new(n_ch: usize, steps_per_trial: usize, seed: u64) -> Self {
        Self {
            rng: SeededRng::new(seed),
            choices: (1..=n_ch).collect(),
            steps_per_trial,
            episode_len: usize::MAX,
            trial_count: 0,
            gt: None,
            step_in_trial: 0,
            step_in_episode: 0,
            started: Vec::new(),
            params_seen: Vec::new(),
        }
    }

    pub fn with_episode_len(mut self, episode_len: usize) -> Self {
        self.episode_len = episode_len;
        self
    }

    pub fn obs_len(&self) -> usize {
        self.choices.len() + 1
    }

    fn observation(&self) -> Vec<f64> {
        let mut obs = vec![0.0; self.obs_len()];
        obs[0] = 1.0;
        if let Some(gt) = self.gt {
            obs[gt] = 1.0;
        }
        obs
    }
}

impl TrialSource for FixedTask {
    fn trial_count(&self) -> u64 {
        self.trial_count
    }

    fn correct_reward(&self) -> f64 {
        R_CORRECT
    }

    fn choices(&self) -> &[usize] {
        &self.choices
    }

    fn ground_truth(&self) -> Option<usize> {
        self.gt
    }

    fn rng(&mut self) -> &mut dyn RandomSource {
        &mut self.rng
    }

    fn start_new_trial(&mut self, ground_truth: usize, params: &TrialParams) -> Result<()> {
        self.gt = Some(ground_truth);
        self.trial_count += 1;
        self.step_in_trial = 0;
        self.started.push(ground_truth);
        self.params_seen.push(params.clone());
        Ok(())
    }

    fn step(&mut self, action: usize) -> Result<StepResult> {
        self.step_in_trial += 1;
        self.step_in_episode += 1;
        let gt = self.gt.unwrap_or(self.choices[0]);
        let decision = self.step_in_trial >= self.steps_per_trial;

        Ok(StepResult {
            observation: self.observation(),
            reward: if decision && action == gt { R_CORRECT } else { 0.0 },
            done: self.step_in_episode >= self.episode_len,
            info: if decision {
                StepInfo::trial_end(gt)
            } else {
                StepInfo::within_trial(gt)
            },
        })
    }

    fn reset(&mut self) -> Result<Vec<f64>> {
        self.step_in_trial = 0;
        self.step_in_episode = 0;
        Ok(self.observation())
    }
}
