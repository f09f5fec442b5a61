use burn::{
    nn::{
        conv::{Conv1d, Conv1dConfig},
        pool::{AdaptiveAvgPool1d, AdaptiveAvgPool1dConfig},
        BatchNorm, BatchNormConfig,
        Dropout, DropoutConfig,
        Initializer,
        Linear, LinearConfig,
        PaddingConfig1d,
    },
    prelude::*,
    tensor::{
        activation::{relu, sigmoid},
        backend::AutodiffBackend,
    },
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct ConvNetConfig {
    pub seq_len:        usize,
    pub alphabet_size:  usize,
    pub num_filters:    usize,
    pub kernel_size:    usize,
    pub hidden_dim:     usize,
    pub bottleneck_dim: usize,
    pub dropout:        f64,
}

impl ConvNetConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> ConvNet<B> {
        // Kaiming-normal (gain √2) keeps activation variance stable
        // through the ReLU — the matching initialiser for this stack.
        let conv = Conv1dConfig::new(self.alphabet_size, self.num_filters, self.kernel_size)
            .with_padding(PaddingConfig1d::Same)
            .with_initializer(Initializer::KaimingNormal {
                gain: std::f64::consts::SQRT_2,
                fan_out_only: false,
            })
            .init(device);
        let norm_conv = BatchNormConfig::new(self.num_filters).init(device);
        let pool      = AdaptiveAvgPool1dConfig::new(1).init();
        let fc1       = LinearConfig::new(self.num_filters, self.hidden_dim).init(device);
        let norm_fc1  = BatchNormConfig::new(self.hidden_dim).init(device);
        let fc2       = LinearConfig::new(self.hidden_dim, self.bottleneck_dim).init(device);
        let norm_fc2  = BatchNormConfig::new(self.bottleneck_dim).init(device);
        let head      = LinearConfig::new(self.bottleneck_dim, 1).init(device);
        let dropout   = DropoutConfig::new(self.dropout).init();
        ConvNet {
            conv, norm_conv, pool,
            fc1, norm_fc1, fc2, norm_fc2,
            head, dropout,
        }
    }
}

/// The fixed convolutional stack:
///   Conv1d+ReLU → BN → Dropout → global average pool
///   → Linear+ReLU → BN → Dropout
///   → Linear+ReLU → BN → Dropout (2-unit bottleneck)
///   → Linear → sigmoid
///
/// Activation comes before normalisation in every block.
#[derive(Module, Debug)]
pub struct ConvNet<B: Backend> {
    pub conv:      Conv1d<B>,
    pub norm_conv: BatchNorm<B, 1>,
    pub pool:      AdaptiveAvgPool1d,
    pub fc1:       Linear<B>,
    pub norm_fc1:  BatchNorm<B, 0>,
    pub fc2:       Linear<B>,
    pub norm_fc2:  BatchNorm<B, 0>,
    pub head:      Linear<B>,
    pub dropout:   Dropout,
}

impl<B: Backend> ConvNet<B> {
    /// features: [batch, seq_len, alphabet] → probabilities: [batch]
    pub fn forward(&self, features: Tensor<B, 3>) -> Tensor<B, 1> {
        let [batch_size, _, _] = features.dims();

        // The archive is channels-last; Conv1d wants [batch, channels, length]
        let x = features.swap_dims(1, 2);

        let x = relu(self.conv.forward(x));
        let x = self.norm_conv.forward(x);
        let x = self.dropout.forward(x);

        // Average over the length axis: [batch, filters, 1] → [batch, filters]
        let x = self.pool.forward(x);
        let [_, filters, _] = x.dims();
        let x = x.reshape([batch_size, filters]);

        let x = relu(self.fc1.forward(x));
        let x = self.norm_fc1.forward(x);
        let x = self.dropout.forward(x);

        let x = relu(self.fc2.forward(x));
        let x = self.norm_fc2.forward(x);
        let x = self.dropout.forward(x);

        // Single sigmoid unit → probability of the positive class
        let x = sigmoid(self.head.forward(x)); // [batch, 1]
        x.reshape([batch_size])
    }

    pub fn forward_loss(
        &self,
        features: Tensor<B, 3>,
        labels:   Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 1>)
    where
        B: AutodiffBackend,
    {
        let probs = self.forward(features);
        let bce = burn::nn::loss::BinaryCrossEntropyLossConfig::new()
            .init(&probs.device());
        let loss = bce.forward(probs.clone(), labels);
        (loss, probs)
    }
}
